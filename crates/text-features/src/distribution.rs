use std::borrow::Borrow;
use std::hash::Hash;

use indexmap::IndexMap;

/// Key -> count table that remembers first-encounter order.
///
/// Equality ignores order; iteration and [`most_common`](Self::most_common)
/// tie-breaking follow the order in which keys were first added.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyDistribution<K: Hash + Eq> {
    counts: IndexMap<K, u64>,
}

impl<K: Hash + Eq> Default for FrequencyDistribution<K> {
    fn default() -> Self {
        Self { counts: IndexMap::new() }
    }
}

impl<K: Hash + Eq> FrequencyDistribution<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        self.add_count(key, 1);
    }

    pub fn add_count(&mut self, key: K, n: u64) {
        *self.counts.entry(key).or_insert(0) += n;
    }

    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> + '_ {
        self.counts.iter().map(|(k, &c)| (k, c))
    }

    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.counts.values().copied()
    }

    /// The `limit` highest counts in descending order; equal counts keep
    /// first-encounter order.
    pub fn most_common(&self, limit: usize) -> Vec<(&K, u64)> {
        let mut entries: Vec<(&K, u64)> = self.iter().collect();
        // stable sort, ties stay in insertion order
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(limit);
        entries
    }
}

impl<K: Hash + Eq> FromIterator<K> for FrequencyDistribution<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut dist = Self::new();
        for key in iter {
            dist.add(key);
        }
        dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_total() {
        let dist: FrequencyDistribution<&str> = ["a", "b", "a", "c", "a"].into_iter().collect();
        assert_eq!(dist.get("a"), 3);
        assert_eq!(dist.get("z"), 0);
        assert_eq!(dist.len(), 3);
        assert_eq!(dist.total(), 5);
    }

    #[test]
    fn most_common_breaks_ties_by_first_encounter() {
        let dist: FrequencyDistribution<&str> =
            ["x", "y", "z", "y", "x", "w", "z"].into_iter().collect();
        let top: Vec<(&str, u64)> = dist.most_common(10).into_iter().map(|(k, c)| (*k, c)).collect();
        assert_eq!(top, vec![("x", 2), ("y", 2), ("z", 2), ("w", 1)]);
    }

    #[test]
    fn most_common_truncates() {
        let dist: FrequencyDistribution<&str> = ["a", "b", "b", "c"].into_iter().collect();
        let top = dist.most_common(2);
        assert_eq!(top.len(), 2);
        assert_eq!(*top[0].0, "b");
        assert_eq!(*top[1].0, "a");
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: FrequencyDistribution<&str> = ["p", "q", "q"].into_iter().collect();
        let mut b = FrequencyDistribution::new();
        b.add_count("q", 2);
        b.add_count("p", 1);
        assert_eq!(a, b);
    }
}
