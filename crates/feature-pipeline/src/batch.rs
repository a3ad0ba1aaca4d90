use std::path::{Path, PathBuf};

use text_features::Annotator;
use tracing::{error, info};

use crate::aggregator::{DocumentReport, FeatureAggregator};
use crate::config::ExtractionConfig;
use crate::document::Document;
use crate::error::PipelineError;
use crate::sanitize::write_features;

/// What happened to each document of a batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(String, PipelineError)>,
    pub reports: Vec<DocumentReport>,
}

impl BatchSummary {
    pub fn attempted(&self) -> usize {
        self.reports.len()
    }
}

/// Aggregate one document and write `<id>_features.json` into `out_dir`.
pub fn extract_document(
    aggregator: &FeatureAggregator<'_>,
    doc: &Document,
    out_dir: &Path,
) -> (DocumentReport, Result<PathBuf, PipelineError>) {
    let report = aggregator.aggregate(doc);
    let path = doc.output_path(out_dir);
    let written = write_features(&report.sanitized, &path).map(|()| path);
    (report, written)
}

/// Process every configured document in turn. Only configuration and
/// discovery problems fail the batch; per-document failures are collected.
pub fn run_batch(
    config: &ExtractionConfig,
    annotator: &dyn Annotator,
) -> Result<BatchSummary, PipelineError> {
    config.validate()?;
    let documents = config.resolve_documents()?;
    info!(documents = documents.len(), "starting feature extraction");

    let aggregator = FeatureAggregator::new(annotator, &config.features);
    let mut summary = BatchSummary::default();
    for doc in &documents {
        info!(document = %doc.id, "processing");
        let (report, written) = extract_document(&aggregator, doc, &config.output_dir);
        match written {
            Ok(path) => summary.written.push(path),
            Err(e) => {
                error!(document = %doc.id, error = %e, "saving features failed");
                summary.failed.push((doc.id.clone(), e));
            }
        }
        summary.reports.push(report);
    }

    info!(
        written = summary.written.len(),
        failed = summary.failed.len(),
        "feature extraction complete"
    );
    Ok(summary)
}
