use std::hash::Hash;

use crate::distribution::FrequencyDistribution;

/// Shannon entropy in bits, `-Σ p·log2(p)` with `p = count / total`.
///
/// `total` is supplied by the caller rather than derived from the
/// distribution so each n-gram order can use its own basis. A zero basis
/// gives `0.0`.
pub fn entropy<K: Hash + Eq>(dist: &FrequencyDistribution<K>, total: u64) -> f64 {
    shannon_entropy(dist.values(), total)
}

pub fn shannon_entropy(counts: impl IntoIterator<Item = u64>, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .into_iter()
        .filter(|&c| c > 0)
        .fold(0.0, |acc, c| {
            let p = c as f64 / total;
            acc + p * (total / c as f64).log2()
        })
}
