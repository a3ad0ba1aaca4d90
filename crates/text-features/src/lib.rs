//! Stylometric measures over prepared token sequences and raw text.

pub mod annotator;
pub mod distribution;
pub mod diversity;
pub mod entropy;
pub mod error;
pub mod ngram;
pub mod pos;
pub mod sentence;
pub mod tokens;

pub use annotator::{Annotator, Lexicon, RuleAnnotator};
pub use distribution::FrequencyDistribution;
pub use diversity::{chunked_ttr, type_token_ratio, DEFAULT_CHUNK_SIZE};
pub use entropy::{entropy, shannon_entropy};
pub use error::{AnnotatorError, ArtifactError};
pub use ngram::{count_ngrams, word_frequencies, Bigram, NGram, Trigram, Unigram};
pub use pos::{pos_frequencies, PosTally};
pub use sentence::avg_sentence_length;
pub use tokens::{read_text, read_tokens, split_tokens, TokenSequence};
