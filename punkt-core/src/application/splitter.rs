//! Sentence splitter
//!
//! Finds every "period context" in the text (a word ending in `.`, `?` or
//! `!` plus whatever follows it), annotates just that context with the
//! learned parameters and cuts the original text where the annotation
//! reports a sentence break. Sentences are returned as borrowed slices or as
//! byte ranges into the input.

use std::ops::Range;
use std::sync::Arc;

use crate::domain::annotate::annotate;
use crate::domain::parameters::ParameterSet;
use crate::domain::scanner::{is_isolated_punct, tokenize};
use crate::domain::token::Token;

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '?' | '!')
}

fn is_closing(ch: char) -> bool {
    matches!(ch, '"' | '\'' | ')' | ']' | '}')
}

/// A potential sentence end and the text needed to judge it
#[derive(Debug, Clone, PartialEq, Eq)]
struct PeriodContext {
    /// Start of the word carrying the terminator
    start: usize,
    /// Byte offset just past the terminator
    terminator_end: usize,
    /// End of the context (the following punctuation or word)
    end: usize,
    /// Start of the following word, when separated by whitespace
    next_token_start: Option<usize>,
}

/// Start and end of the next whitespace-delimited run at or after `from`
fn next_run(text: &str, from: usize) -> Option<(usize, usize)> {
    let rest = &text[from..];
    let offset = rest.find(|c: char| !c.is_whitespace())?;
    let start = from + offset;
    let end = text[start..]
        .find(char::is_whitespace)
        .map_or(text.len(), |len| start + len);
    Some((start, end))
}

/// Next period context at or after `from`
///
/// Within a run the last qualifying terminator wins, so `Really?!` is one
/// context ending after the `!`.
fn find_period_context(text: &str, from: usize) -> Option<PeriodContext> {
    let mut cursor = from;

    while let Some((start, end)) = next_run(text, cursor) {
        let run = &text[start..end];
        let mut found = None;

        for (i, ch) in run.char_indices() {
            if !is_terminator(ch) {
                continue;
            }

            let terminator_end = start + i + ch.len_utf8();
            if terminator_end < end {
                if let Some(next) = text[terminator_end..end].chars().next() {
                    if is_isolated_punct(next) {
                        found = Some(PeriodContext {
                            start,
                            terminator_end,
                            end: terminator_end + next.len_utf8(),
                            next_token_start: None,
                        });
                    }
                }
            } else if let Some((next_start, next_end)) = next_run(text, end) {
                found = Some(PeriodContext {
                    start,
                    terminator_end,
                    end: next_end,
                    next_token_start: Some(next_start),
                });
            }
        }

        if found.is_some() {
            return found;
        }
        cursor = end;
    }

    None
}

/// Splits text into sentences with a trained [`ParameterSet`]
///
/// The parameters are shared through an [`Arc`], so one tokenizer can be
/// cloned cheaply or used from several threads.
///
/// ```
/// use punkt_core::{ParameterSet, SentenceTokenizer};
///
/// let mut params = ParameterSet::new();
/// params.insert_abbrev_type("dr");
///
/// let tokenizer = SentenceTokenizer::new(params);
/// let sentences = tokenizer.sentences("Dr. Watson arrived. He was late.");
/// assert_eq!(sentences, vec!["Dr. Watson arrived.", "He was late."]);
/// ```
#[derive(Debug, Clone)]
pub struct SentenceTokenizer {
    params: Arc<ParameterSet>,
    realign_boundaries: bool,
}

impl SentenceTokenizer {
    pub fn new(params: impl Into<Arc<ParameterSet>>) -> Self {
        Self {
            params: params.into(),
            realign_boundaries: true,
        }
    }

    /// Enable or disable moving closing quotes and brackets back to the
    /// sentence they close
    pub fn with_realignment(mut self, realign: bool) -> Self {
        self.realign_boundaries = realign;
        self
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    /// Sentences of `text` as slices of the input
    pub fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.spans(text)
            .into_iter()
            .map(|span| &text[span])
            .collect()
    }

    /// Byte ranges of the sentences of `text`
    pub fn spans(&self, text: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut sentence_start = text
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(text.len());
        let mut cursor = sentence_start;

        while let Some(context) = find_period_context(text, cursor) {
            if self.text_contains_sentence_break(&text[context.start..context.end]) {
                spans.push(sentence_start..context.terminator_end);
                sentence_start = context.next_token_start.unwrap_or(context.terminator_end);
            }
            cursor = context.terminator_end;
        }

        let remainder = text[sentence_start..].trim_end();
        let leading = remainder.len() - remainder.trim_start().len();
        if leading < remainder.len() {
            spans.push(sentence_start + leading..sentence_start + remainder.len());
        }

        if self.realign_boundaries {
            realign_boundaries(text, spans)
        } else {
            spans
        }
    }

    /// True if annotating `text` yields a sentence break before its last
    /// token
    pub fn text_contains_sentence_break(&self, text: &str) -> bool {
        let mut tokens = tokenize(text);
        annotate(&self.params, &mut tokens);

        let before_last = tokens.len().saturating_sub(1);
        tokens[..before_last]
            .iter()
            .any(Token::is_sentence_break)
    }

    /// Annotate pre-split words and group them into sentences
    pub fn sentences_from_tokens<I, S>(&self, words: I) -> Vec<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens: Vec<Token> = words.into_iter().map(Token::new).collect();
        annotate(&self.params, &mut tokens);

        let mut sentences = Vec::new();
        let mut sentence = Vec::new();
        for token in tokens {
            let is_break = token.is_sentence_break();
            sentence.push(token.value().to_string());
            if is_break {
                sentences.push(std::mem::take(&mut sentence));
            }
        }
        if !sentence.is_empty() {
            sentences.push(sentence);
        }

        sentences
    }
}

/// Length of a leading run of closing characters that is followed by
/// whitespace, `--` or the end of `sentence`, plus the whitespace after it
fn closing_prefix(sentence: &str) -> Option<(usize, usize)> {
    let closers = sentence
        .find(|c: char| !is_closing(c))
        .unwrap_or(sentence.len());
    if closers == 0 {
        return None;
    }

    let rest = &sentence[closers..];
    let whitespace = rest.len() - rest.trim_start().len();
    if whitespace > 0 || rest.is_empty() || rest.starts_with("--") {
        Some((closers, whitespace))
    } else {
        None
    }
}

/// Move closing quotes and brackets at the start of a sentence to the end of
/// the previous one
fn realign_boundaries(text: &str, spans: Vec<Range<usize>>) -> Vec<Range<usize>> {
    let mut realigned: Vec<Range<usize>> = Vec::with_capacity(spans.len());

    for mut span in spans {
        if let Some(previous) = realigned.last_mut() {
            if let Some((closers, whitespace)) = closing_prefix(&text[span.clone()]) {
                previous.end = span.start + closers;
                span.start += closers + whitespace;
            }
        }

        if span.start < span.end {
            realigned.push(span);
        }
    }

    realigned
}
