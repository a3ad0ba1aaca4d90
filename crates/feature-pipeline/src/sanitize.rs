//! JSON-safe rendering of feature records.
//!
//! N-gram keys become single strings joined with a separator, ranked pairs
//! become two-element arrays and scalars pass through. Output keeps record
//! order, is indented by four spaces and leaves non-ASCII text unescaped.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use text_features::{FrequencyDistribution, NGram};
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::record::{FeatureRecord, FeatureValue};

pub const DEFAULT_SEPARATOR: &str = "_";

pub fn sanitize(record: &FeatureRecord, separator: &str) -> Value {
    let fields: Map<String, Value> = record
        .iter()
        .map(|(name, value)| (name.to_owned(), sanitize_value(value, separator)))
        .collect();
    Value::Object(fields)
}

pub fn sanitize_value(value: &FeatureValue, separator: &str) -> Value {
    match value {
        FeatureValue::Integer(v) => Value::from(*v),
        // non-finite floats have no JSON form
        FeatureValue::Float(v) => Number::from_f64(*v).map(Value::Number).unwrap_or(Value::Null),
        FeatureValue::Unigrams(dist) => ngram_object(dist, separator),
        FeatureValue::Bigrams(dist) => ngram_object(dist, separator),
        FeatureValue::Trigrams(dist) => ngram_object(dist, separator),
        FeatureValue::Tags(dist) => Value::Object(
            dist.iter().map(|(tag, n)| (tag.clone(), Value::from(n))).collect(),
        ),
        FeatureValue::Ranked(pairs) => Value::Array(
            pairs
                .iter()
                .map(|(item, n)| Value::Array(vec![Value::from(item.as_str()), Value::from(*n)]))
                .collect(),
        ),
    }
}

/// N-grams whose tokens contain the separator can join to the same key;
/// their counts are summed under it.
fn ngram_object<const N: usize>(dist: &FrequencyDistribution<NGram<N>>, separator: &str) -> Value {
    let mut joined: IndexMap<String, u64> = IndexMap::with_capacity(dist.len());
    let mut collisions = 0usize;
    for (gram, n) in dist.iter() {
        joined
            .entry(gram.join(separator))
            .and_modify(|count| {
                *count += n;
                collisions += 1;
            })
            .or_insert(n);
    }
    if collisions > 0 {
        warn!(n = N, collisions, separator, "n-grams share joined keys, counts merged");
    }
    Value::Object(joined.into_iter().map(|(key, n)| (key, Value::from(n))).collect())
}

/// Rebuild an n-gram distribution from its sanitized object. `None` if a
/// key does not split into `N` tokens or a count is not an unsigned integer.
pub fn restore_ngrams<const N: usize>(
    object: &Map<String, Value>,
    separator: &str,
) -> Option<FrequencyDistribution<NGram<N>>> {
    let mut dist = FrequencyDistribution::new();
    for (key, count) in object {
        dist.add_count(NGram::from_joined(key, separator)?, count.as_u64()?);
    }
    Some(dist)
}

pub fn to_pretty_json(value: &Value) -> Result<Vec<u8>, PipelineError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Write a sanitized record, creating the parent directory if needed.
pub fn write_features(value: &Value, path: &Path) -> Result<(), PipelineError> {
    let bytes = to_pretty_json(value)?;
    let io_err = |source| PipelineError::Serialization { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, bytes).map_err(io_err)?;
    info!(path = %path.display(), "features saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::keys;
    use text_features::{count_ngrams, Bigram};

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn bigram_keys_are_joined() {
        let mut dist = FrequencyDistribution::new();
        dist.add_count(NGram::new(["a", "b"]), 3);

        let value = sanitize_value(&FeatureValue::Bigrams(dist.clone()), "_");
        assert_eq!(value, serde_json::json!({ "a_b": 3 }));

        let restored = restore_ngrams::<2>(value.as_object().unwrap(), "_").unwrap();
        assert_eq!(restored, dist);
    }

    #[test]
    fn colliding_keys_keep_every_count() {
        let mut dist = FrequencyDistribution::new();
        dist.add_count(NGram::new(["a_b", "c"]), 2);
        dist.add_count(NGram::new(["a", "b_c"]), 5);
        dist.add_count(NGram::new(["d", "e"]), 1);

        let value = sanitize_value(&FeatureValue::Bigrams(dist.clone()), "_");
        assert_eq!(value, serde_json::json!({ "a_b_c": 7, "d_e": 1 }));
        let sum: u64 = value.as_object().unwrap().values().filter_map(Value::as_u64).sum();
        assert_eq!(sum, dist.total());
    }

    #[test]
    fn custom_separator() {
        let dist = count_ngrams::<3>(&toks("x y z"));
        let value = sanitize_value(&FeatureValue::Trigrams(dist), " ");
        assert_eq!(value, serde_json::json!({ "x y z": 1 }));
    }

    #[test]
    fn restore_rejects_wrong_arity() {
        let object = serde_json::json!({ "a_b_c": 1 });
        assert!(restore_ngrams::<2>(object.as_object().unwrap(), "_").is_none());
    }

    #[test]
    fn ranked_pairs_become_arrays() {
        let value = sanitize_value(
            &FeatureValue::Ranked(vec![("дом".into(), 4), ("кот".into(), 2)]),
            "_",
        );
        assert_eq!(value, serde_json::json!([["дом", 4], ["кот", 2]]));
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(sanitize_value(&FeatureValue::Integer(7), "_"), serde_json::json!(7));
        assert_eq!(sanitize_value(&FeatureValue::Float(0.5), "_"), serde_json::json!(0.5));
        assert_eq!(sanitize_value(&FeatureValue::Float(f64::NAN), "_"), Value::Null);
    }

    #[test]
    fn record_order_is_preserved() {
        let mut record = FeatureRecord::new();
        record.insert(keys::TOTAL_WORD_COUNT, FeatureValue::Integer(3));
        record.insert(keys::BIGRAM_ENTROPY, FeatureValue::Float(1.0));
        record.insert(keys::UNIGRAM_ENTROPY, FeatureValue::Float(0.9));

        let value = sanitize(&record, "_");
        let order: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(order, vec!["total_word_count", "bigram_entropy", "unigram_entropy"]);
    }

    #[test]
    fn pretty_output_keeps_non_ascii() {
        let mut dist: FrequencyDistribution<Bigram> = FrequencyDistribution::new();
        dist.add(NGram::new(["мир", "труд"]));
        let mut record = FeatureRecord::new();
        record.insert(keys::BIGRAM_FREQUENCIES, FeatureValue::Bigrams(dist));

        let text = String::from_utf8(to_pretty_json(&sanitize(&record, "_")).unwrap()).unwrap();
        assert_eq!(text, "{\n    \"bigram_frequencies\": {\n        \"мир_труд\": 1\n    }\n}");
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/Ru1_features.json");
        write_features(&serde_json::json!({ "k": 1 }), &path).unwrap();

        let back: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, serde_json::json!({ "k": 1 }));
    }

    #[test]
    fn write_failure_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        // target path is an existing directory
        let err = write_features(&serde_json::json!({}), dir.path()).unwrap_err();
        assert!(matches!(err, PipelineError::Serialization { .. }));
    }
}
