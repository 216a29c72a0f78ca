//! Benchmarks for training, splitting and scanning

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use punkt_core::{scan, train, SentenceTokenizer};
use std::hint::black_box;

/// Generate text of roughly `size_kb` kilobytes
fn generate_text(size_kb: usize) -> String {
    let base_text = "Dr. Watson met Mr. Holmes at 5 p.m. yesterday. They talked about \
                     dogs, horses, etc. until midnight. Was it late? It was!\n";
    let target_size = size_kb * 1024;
    let repeat_count = target_size / base_text.len() + 1;
    let text = base_text.repeat(repeat_count);

    // Cut at a word boundary so the last token stays intact
    let cut = text[..target_size]
        .rfind(char::is_whitespace)
        .unwrap_or(target_size);
    text[..cut].to_string()
}

fn bench_train(c: &mut Criterion) {
    let mut group = c.benchmark_group("train");

    for size_kb in [10, 100, 500] {
        let text = generate_text(size_kb);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}KB", size_kb)),
            &text,
            |b, text| b.iter(|| train(black_box(text))),
        );
    }

    group.finish();
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");
    let tokenizer = SentenceTokenizer::new(train(&generate_text(100)));

    for size_kb in [10, 100, 1000] {
        let text = generate_text(size_kb);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("sentences", format!("{}KB", size_kb)),
            &text,
            |b, text| b.iter(|| tokenizer.sentences(black_box(text))),
        );

        group.bench_with_input(
            BenchmarkId::new("spans_no_realign", format!("{}KB", size_kb)),
            &text,
            |b, text| {
                let tokenizer = tokenizer.clone().with_realignment(false);
                b.iter(|| tokenizer.spans(black_box(text)));
            },
        );
    }

    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let text = generate_text(100);
    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("100KB", |b| b.iter(|| scan(black_box(&text))));
    group.finish();
}

criterion_group!(benches, bench_train, bench_split, bench_scan);
criterion_main!(benches);
