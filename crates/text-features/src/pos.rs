use std::collections::HashMap;

use tracing::warn;

use crate::annotator::Annotator;
use crate::distribution::FrequencyDistribution;
use crate::error::AnnotatorError;

#[derive(Debug, Default)]
pub struct PosTally {
    pub tags: FrequencyDistribution<String>,
    /// One error per distinct token the annotator failed on.
    pub errors: Vec<AnnotatorError>,
    /// Token occurrences left out of `tags` because tagging failed.
    pub excluded: u64,
}

/// Tally of each token's best part-of-speech tag.
///
/// Untagged tokens and tokens the annotator fails on are left out of the
/// tally; the failures are returned alongside it. Each distinct token is
/// looked up once.
pub fn pos_frequencies<A: Annotator + ?Sized>(tokens: &[String], annotator: &A) -> PosTally {
    let mut resolved: HashMap<&str, Result<Option<String>, ()>> = HashMap::new();
    let mut tally = PosTally::default();

    for token in tokens {
        let errors = &mut tally.errors;
        let tag = resolved.entry(token.as_str()).or_insert_with(|| {
            annotator.tag_part_of_speech(token).map_err(|e| errors.push(e))
        });
        match tag {
            Ok(Some(tag)) => tally.tags.add(tag.clone()),
            Ok(None) => {}
            Err(()) => tally.excluded += 1,
        }
    }

    if let Some(first) = tally.errors.first() {
        warn!(
            distinct_failures = tally.errors.len(),
            excluded = tally.excluded,
            error = %first,
            "tokens excluded after tagging errors"
        );
    }
    tally
}
