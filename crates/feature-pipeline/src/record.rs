use indexmap::IndexMap;
use text_features::{Bigram, FrequencyDistribution, Trigram, Unigram};

/// Top-level keys of a feature record, in output order.
pub mod keys {
    pub const TOTAL_WORD_COUNT: &str = "total_word_count";
    pub const UNIGRAM_FREQUENCIES: &str = "unigram_frequencies";
    pub const BIGRAM_FREQUENCIES: &str = "bigram_frequencies";
    pub const TRIGRAM_FREQUENCIES: &str = "trigram_frequencies";
    pub const UNIGRAM_ENTROPY: &str = "unigram_entropy";
    pub const BIGRAM_ENTROPY: &str = "bigram_entropy";

    pub const CONTENT_WORD_COUNT: &str = "content_word_count";
    pub const UNIQUE_CONTENT_WORD_COUNT: &str = "unique_content_word_count";
    pub const MFW_FREQUENCIES: &str = "mfw_frequencies";
    pub const CHUNKED_TTR: &str = "chunked_ttr";
    pub const POS_FREQUENCIES: &str = "pos_frequencies";

    pub const AVG_SENTENCE_LENGTH: &str = "avg_sentence_length";
}

/// Closed set of values a feature can take.
#[derive(Clone, Debug, PartialEq)]
pub enum FeatureValue {
    Integer(u64),
    Float(f64),
    Unigrams(FrequencyDistribution<Unigram>),
    Bigrams(FrequencyDistribution<Bigram>),
    Trigrams(FrequencyDistribution<Trigram>),
    Tags(FrequencyDistribution<String>),
    /// (item, count) pairs, order significant.
    Ranked(Vec<(String, u64)>),
}

impl FeatureValue {
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            FeatureValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FeatureValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

/// Named features of one document, kept in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureRecord {
    fields: IndexMap<String, FeatureValue>,
}

impl FeatureRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FeatureValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> Extend<(K, FeatureValue)> for FeatureRecord {
    fn extend<I: IntoIterator<Item = (K, FeatureValue)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
