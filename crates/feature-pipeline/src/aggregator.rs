//! Per-document feature assembly.
//!
//! A run walks `Init → StopwordsIncludedPass → StopwordsExcludedPass →
//! SentencePass → Sanitize → Done`. A pass whose artifact cannot be read is
//! skipped and its fields are left out; the run still reaches `Done`.

use serde_json::Value;
use text_features::{
    avg_sentence_length, chunked_ttr, count_ngrams, entropy, pos_frequencies, read_text,
    read_tokens, word_frequencies, Annotator, AnnotatorError, TokenSequence,
};
use tracing::{debug, info, warn};

use crate::config::FeatureSettings;
use crate::document::Document;
use crate::error::SkipReason;
use crate::record::{keys, FeatureRecord, FeatureValue};
use crate::sanitize::sanitize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pass {
    StopwordsIncluded,
    StopwordsExcluded,
    Sentence,
}

impl Pass {
    pub const ALL: [Pass; 3] = [Pass::StopwordsIncluded, Pass::StopwordsExcluded, Pass::Sentence];

    pub fn state(self) -> AggregatorState {
        match self {
            Pass::StopwordsIncluded => AggregatorState::StopwordsIncludedPass,
            Pass::StopwordsExcluded => AggregatorState::StopwordsExcludedPass,
            Pass::Sentence => AggregatorState::SentencePass,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggregatorState {
    Init,
    StopwordsIncludedPass,
    StopwordsExcludedPass,
    SentencePass,
    Sanitize,
    Done,
}

impl AggregatorState {
    pub fn next(self) -> Option<AggregatorState> {
        use AggregatorState::*;
        match self {
            Init => Some(StopwordsIncludedPass),
            StopwordsIncludedPass => Some(StopwordsExcludedPass),
            StopwordsExcludedPass => Some(SentencePass),
            SentencePass => Some(Sanitize),
            Sanitize => Some(Done),
            Done => None,
        }
    }
}

/// Fields produced by one pass, plus the annotator errors that degraded them.
#[derive(Debug)]
struct PassOutput {
    fields: Vec<(&'static str, FeatureValue)>,
    degraded: Vec<AnnotatorError>,
}

type PassResult = Result<PassOutput, SkipReason>;

/// Outcome of aggregating one document.
#[derive(Debug)]
pub struct DocumentReport {
    pub id: String,
    pub record: FeatureRecord,
    /// JSON-safe form of `record`, filled in the `Sanitize` state.
    pub sanitized: Value,
    pub state: AggregatorState,
    pub completed: Vec<Pass>,
    pub skipped: Vec<(Pass, SkipReason)>,
    pub degraded: Vec<(Pass, AnnotatorError)>,
}

impl DocumentReport {
    pub fn was_skipped(&self, pass: Pass) -> bool {
        self.skipped.iter().any(|(p, _)| *p == pass)
    }
}

pub struct FeatureAggregator<'a> {
    annotator: &'a dyn Annotator,
    settings: &'a FeatureSettings,
}

impl<'a> FeatureAggregator<'a> {
    pub fn new(annotator: &'a dyn Annotator, settings: &'a FeatureSettings) -> Self {
        Self { annotator, settings }
    }

    pub fn aggregate(&self, doc: &Document) -> DocumentReport {
        let mut report = DocumentReport {
            id: doc.id.clone(),
            record: FeatureRecord::new(),
            sanitized: Value::Null,
            state: AggregatorState::Init,
            completed: Vec::new(),
            skipped: Vec::new(),
            degraded: Vec::new(),
        };

        let [included, excluded, sentence] = self.run_passes(doc);
        for (pass, result) in [
            (Pass::StopwordsIncluded, included),
            (Pass::StopwordsExcluded, excluded),
            (Pass::Sentence, sentence),
        ] {
            self.advance(&mut report, pass.state());
            match result {
                Ok(output) => {
                    report.record.extend(output.fields);
                    if let Some(e) = output.degraded.first() {
                        warn!(
                            document = %doc.id,
                            ?pass,
                            errors = output.degraded.len(),
                            error = %e,
                            "annotator failed, features degraded"
                        );
                    }
                    report.degraded.extend(output.degraded.into_iter().map(|e| (pass, e)));
                    report.completed.push(pass);
                }
                Err(reason) => {
                    if reason.is_missing() {
                        warn!(document = %doc.id, ?pass, "{reason}; pass skipped");
                    } else {
                        warn!(document = %doc.id, ?pass, error = %reason, "pass skipped");
                    }
                    report.skipped.push((pass, reason));
                }
            }
        }

        self.advance(&mut report, AggregatorState::Sanitize);
        report.sanitized = sanitize(&report.record, &self.settings.ngram_separator);
        self.advance(&mut report, AggregatorState::Done);
        report
    }

    fn advance(&self, report: &mut DocumentReport, to: AggregatorState) {
        debug_assert_eq!(report.state.next(), Some(to));
        debug!(document = %report.id, from = ?report.state, ?to, "aggregator transition");
        report.state = to;
    }

    fn run_passes(&self, doc: &Document) -> [PassResult; 3] {
        if self.settings.parallel_passes {
            let (included, (excluded, sentence)) = rayon::join(
                || self.stopwords_included(doc),
                || rayon::join(|| self.stopwords_excluded(doc), || self.sentence(doc)),
            );
            [included, excluded, sentence]
        } else {
            [self.stopwords_included(doc), self.stopwords_excluded(doc), self.sentence(doc)]
        }
    }

    fn stopwords_included(&self, doc: &Document) -> PassResult {
        let tokens = load_tokens(doc, Pass::StopwordsIncluded)?;
        let total = tokens.len() as u64;
        let unigrams = count_ngrams::<1>(&tokens);
        let bigrams = count_ngrams::<2>(&tokens);
        let trigrams = count_ngrams::<3>(&tokens);
        let unigram_entropy = entropy(&unigrams, total);
        // basis is the word count minus one, not the bigram total
        let bigram_entropy = entropy(&bigrams, total.saturating_sub(1));

        Ok(PassOutput {
            fields: vec![
                (keys::TOTAL_WORD_COUNT, FeatureValue::Integer(total)),
                (keys::UNIGRAM_FREQUENCIES, FeatureValue::Unigrams(unigrams)),
                (keys::BIGRAM_FREQUENCIES, FeatureValue::Bigrams(bigrams)),
                (keys::TRIGRAM_FREQUENCIES, FeatureValue::Trigrams(trigrams)),
                (keys::UNIGRAM_ENTROPY, FeatureValue::Float(unigram_entropy)),
                (keys::BIGRAM_ENTROPY, FeatureValue::Float(bigram_entropy)),
            ],
            degraded: Vec::new(),
        })
    }

    fn stopwords_excluded(&self, doc: &Document) -> PassResult {
        let tokens = load_tokens(doc, Pass::StopwordsExcluded)?;
        let words = word_frequencies(&tokens);
        let mfw: Vec<(String, u64)> = words
            .most_common(self.settings.mfw_limit)
            .into_iter()
            .map(|(w, n)| (w.clone(), n))
            .collect();
        let ttr = chunked_ttr(&tokens, self.settings.chunk_size);
        let pos = pos_frequencies(&tokens, self.annotator);

        Ok(PassOutput {
            fields: vec![
                (keys::CONTENT_WORD_COUNT, FeatureValue::Integer(tokens.len() as u64)),
                (keys::UNIQUE_CONTENT_WORD_COUNT, FeatureValue::Integer(words.len() as u64)),
                (keys::MFW_FREQUENCIES, FeatureValue::Ranked(mfw)),
                (keys::CHUNKED_TTR, FeatureValue::Float(ttr)),
                (keys::POS_FREQUENCIES, FeatureValue::Tags(pos.tags)),
            ],
            degraded: pos.errors,
        })
    }

    fn sentence(&self, doc: &Document) -> PassResult {
        let text = read_text(&doc.raw_text)?;
        info!(document = %doc.id, path = %doc.raw_text.display(), "analyzing sentence structure");
        let (avg, degraded) = match avg_sentence_length(&text, self.annotator) {
            Ok(avg) => (avg, Vec::new()),
            Err(e) => (0.0, vec![e]),
        };
        Ok(PassOutput {
            fields: vec![(keys::AVG_SENTENCE_LENGTH, FeatureValue::Float(avg))],
            degraded,
        })
    }
}

fn load_tokens(doc: &Document, pass: Pass) -> Result<TokenSequence, SkipReason> {
    let path = match pass {
        Pass::StopwordsExcluded => &doc.tokens_without_stops,
        _ => &doc.tokens_with_stops,
    };
    let tokens = read_tokens(path)?;
    if tokens.is_empty() {
        return Err(SkipReason::Empty(path.clone()));
    }
    info!(document = %doc.id, path = %path.display(), tokens = tokens.len(), "analyzing");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_form_a_single_chain() {
        let mut state = AggregatorState::Init;
        let mut seen = vec![state];
        while let Some(next) = state.next() {
            seen.push(next);
            state = next;
        }
        assert_eq!(
            seen,
            vec![
                AggregatorState::Init,
                AggregatorState::StopwordsIncludedPass,
                AggregatorState::StopwordsExcludedPass,
                AggregatorState::SentencePass,
                AggregatorState::Sanitize,
                AggregatorState::Done,
            ]
        );
    }

    #[test]
    fn passes_map_to_their_states() {
        let states: Vec<AggregatorState> = Pass::ALL.iter().map(|p| p.state()).collect();
        assert_eq!(
            states,
            vec![
                AggregatorState::StopwordsIncludedPass,
                AggregatorState::StopwordsExcludedPass,
                AggregatorState::SentencePass,
            ]
        );
    }
}
