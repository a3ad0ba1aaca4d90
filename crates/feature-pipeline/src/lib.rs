//! Per-document stylometric feature records: aggregation, JSON sanitizing
//! and batch output.

pub mod aggregator;
pub mod batch;
pub mod config;
pub mod document;
pub mod error;
pub mod record;
pub mod sanitize;

pub use aggregator::{AggregatorState, DocumentReport, FeatureAggregator, Pass};
pub use batch::{extract_document, run_batch, BatchSummary};
pub use config::{ExtractionConfig, FeatureSettings};
pub use document::{discover_documents, Document};
pub use error::{PipelineError, SkipReason};
pub use record::{keys, FeatureRecord, FeatureValue};
pub use sanitize::{restore_ngrams, sanitize, to_pretty_json, write_features};
