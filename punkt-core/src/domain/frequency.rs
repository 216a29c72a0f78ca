//! Frequency table over hashable samples
//!
//! Counts occurrences of samples (token types, type pairs) and keeps two
//! derived caches: the most frequent sample and the full ranking by
//! descending count. Both caches are dropped on every write.

use std::borrow::Borrow;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::hash::Hash;

/// Counted multiset with cached maximum and ranking
#[derive(Debug, Clone)]
pub struct FrequencyTable<K = String>
where
    K: Eq + Hash,
{
    /// Sum of all counts
    total: usize,
    counts: HashMap<K, usize>,
    max_cache: OnceCell<Option<(K, usize)>>,
    ranking_cache: OnceCell<Vec<(K, usize)>>,
}

impl<K> Default for FrequencyTable<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            total: 0,
            counts: HashMap::new(),
            max_cache: OnceCell::new(),
            ranking_cache: OnceCell::new(),
        }
    }
}

impl<K> FrequencyTable<K>
where
    K: Clone + Eq + Hash + Ord,
{
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count recorded for `sample` (0 when absent)
    pub fn get<Q>(&self, sample: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.get(sample).copied().unwrap_or(0)
    }

    /// Set the count of `sample` directly, adjusting the total
    pub fn set(&mut self, sample: K, count: usize) {
        let previous = self.counts.insert(sample, count).unwrap_or(0);
        self.total = self.total - previous + count;
        self.invalidate();
    }

    /// Add one occurrence of `sample`
    pub fn increment(&mut self, sample: K) {
        self.increment_by(sample, 1);
    }

    /// Add `n` occurrences of `sample`
    pub fn increment_by(&mut self, sample: K, n: usize) {
        *self.counts.entry(sample).or_insert(0) += n;
        self.total += n;
        self.invalidate();
    }

    /// Total number of recorded occurrences
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct samples
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Relative frequency of `sample`; 0 for an empty table
    pub fn frequency_of<Q>(&self, sample: &Q) -> f64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.total == 0 {
            return 0.0;
        }
        self.get(sample) as f64 / self.total as f64
    }

    /// Most frequent sample and its count
    ///
    /// Ties are resolved towards the smallest sample so the result does not
    /// depend on hash order.
    pub fn max(&self) -> Option<(&K, usize)> {
        self.max_cache
            .get_or_init(|| {
                self.counts
                    .iter()
                    .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then_with(|| kb.cmp(ka)))
                    .map(|(k, c)| (k.clone(), *c))
            })
            .as_ref()
            .map(|(k, c)| (k, *c))
    }

    /// All samples ranked by descending count, ties by ascending sample
    pub fn ordered_samples(&self) -> &[(K, usize)] {
        self.ranking_cache.get_or_init(|| {
            let mut ranking: Vec<(K, usize)> =
                self.counts.iter().map(|(k, c)| (k.clone(), *c)).collect();
            ranking.sort_by(|(ka, ca), (kb, cb)| cb.cmp(ca).then_with(|| ka.cmp(kb)));
            ranking
        })
    }

    /// Iterate over samples and counts in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> + '_ {
        self.counts.iter().map(|(k, c)| (k, *c))
    }

    /// Remove every sample
    pub fn clear(&mut self) {
        self.total = 0;
        self.counts.clear();
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.max_cache.take();
        self.ranking_cache.take();
    }
}
