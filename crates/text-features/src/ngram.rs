use crate::distribution::FrequencyDistribution;

/// Contiguous run of `N` tokens, compared element-wise.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NGram<const N: usize>(pub [String; N]);

pub type Unigram = NGram<1>;
pub type Bigram = NGram<2>;
pub type Trigram = NGram<3>;

impl<const N: usize> NGram<N> {
    pub fn new(tokens: [&str; N]) -> Self {
        NGram(tokens.map(str::to_owned))
    }

    /// Single string key, tokens joined by `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }

    /// Inverse of [`join`](Self::join). Fails when the key does not split
    /// into exactly `N` parts.
    pub fn from_joined(key: &str, separator: &str) -> Option<Self> {
        let parts: Vec<String> = if N == 1 {
            vec![key.to_owned()]
        } else {
            key.split(separator).map(str::to_owned).collect()
        };
        parts.try_into().ok().map(NGram)
    }
}

/// Frequency of every length-`N` window, sliding by one with no padding.
/// Shorter inputs give an empty distribution.
pub fn count_ngrams<const N: usize>(tokens: &[String]) -> FrequencyDistribution<NGram<N>> {
    if N == 0 || tokens.len() < N {
        return FrequencyDistribution::new();
    }
    tokens
        .windows(N)
        .map(|w| NGram(std::array::from_fn(|i| w[i].clone())))
        .collect()
}

/// Plain per-token counts.
pub fn word_frequencies(tokens: &[String]) -> FrequencyDistribution<String> {
    tokens.iter().cloned().collect()
}
