use std::path::PathBuf;

use text_features::{AnnotatorError, ArtifactError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Annotator(#[from] AnnotatorError),

    #[error("failed writing features to {}: {source}", .path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed encoding features: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed listing documents in {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed reading config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed parsing config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Why a pass contributed nothing to the record.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error(transparent)]
    Unreadable(#[from] ArtifactError),

    #[error("artifact has no tokens: {}", .0.display())]
    Empty(PathBuf),
}

impl SkipReason {
    pub fn is_missing(&self) -> bool {
        matches!(self, SkipReason::Unreadable(e) if e.is_not_found())
    }
}
