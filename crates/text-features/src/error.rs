use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to read one of a document's prepared artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArtifactError {
    pub(crate) fn from_io(path: &Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => ArtifactError::NotFound { path: path.to_path_buf() },
            _ => ArtifactError::Io { path: path.to_path_buf(), source },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ArtifactError::NotFound { path } | ArtifactError::Io { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ArtifactError::NotFound { .. })
    }
}

/// Failure reported by a linguistic annotator.
#[derive(Debug, Error)]
pub enum AnnotatorError {
    #[error("sentence segmentation failed: {0}")]
    Segmentation(String),

    #[error("tagging failed for {token:?}: {reason}")]
    Tagging { token: String, reason: String },

    #[error("failed loading lexicon {}: {source}", .path.display())]
    Lexicon {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid segmentation pattern: {0}")]
    Pattern(#[from] regex::Error),
}
