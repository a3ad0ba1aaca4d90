//! Batch configuration, loaded from TOML and overridden from the command line.
//!
//! ```toml
//! input_dir = "corpus"
//! output_dir = "features"
//! documents = ["Ru1", "Ru2"]
//! lexicon = "lexicon.tsv"
//!
//! [features]
//! chunk_size = 2000
//! mfw_limit = 100
//! ngram_separator = "_"
//! parallel_passes = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::document::{discover_documents, Document};
use crate::error::PipelineError;
use crate::sanitize::DEFAULT_SEPARATOR;

pub const DEFAULT_MFW_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractionConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Empty means every document found in `input_dir`.
    pub documents: Vec<String>,
    /// `token<TAB>tag` lexicon for the built-in tagger.
    pub lexicon: Option<PathBuf>,
    pub features: FeatureSettings,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureSettings {
    pub chunk_size: usize,
    pub mfw_limit: usize,
    pub ngram_separator: String,
    pub parallel_passes: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            documents: Vec::new(),
            lexicon: None,
            features: FeatureSettings::default(),
        }
    }
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self {
            chunk_size: text_features::DEFAULT_CHUNK_SIZE,
            mfw_limit: DEFAULT_MFW_LIMIT,
            ngram_separator: DEFAULT_SEPARATOR.to_owned(),
            parallel_passes: false,
        }
    }
}

impl ExtractionConfig {
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let text = fs::read_to_string(path).map_err(|source| PipelineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, PipelineError> {
        Ok(toml::from_str(text)?)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        self.features.validate()
    }

    /// Configured documents, or the ones discovered in `input_dir`.
    pub fn resolve_documents(&self) -> Result<Vec<Document>, PipelineError> {
        let ids = if self.documents.is_empty() {
            discover_documents(&self.input_dir)?
        } else {
            self.documents.clone()
        };
        Ok(ids.iter().map(|id| Document::in_dir(&self.input_dir, id)).collect())
    }
}

impl FeatureSettings {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.chunk_size == 0 {
            return Err(PipelineError::Config("chunk_size must be positive".into()));
        }
        if self.ngram_separator.is_empty() {
            return Err(PipelineError::Config("ngram_separator must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = ExtractionConfig::from_toml_str("").unwrap();
        assert_eq!(config, ExtractionConfig::default());
        assert_eq!(config.features.chunk_size, 2000);
        assert_eq!(config.features.mfw_limit, 100);
        assert_eq!(config.features.ngram_separator, "_");
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = ExtractionConfig::from_toml_str(
            r#"
            input_dir = "corpus"
            documents = ["Ru1", "Ru3"]

            [features]
            parallel_passes = true
            "#,
        )
        .unwrap();
        assert_eq!(config.input_dir, PathBuf::from("corpus"));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.documents, vec!["Ru1", "Ru3"]);
        assert!(config.features.parallel_passes);
        assert_eq!(config.features.chunk_size, 2000);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            ExtractionConfig::from_toml_str("chunksize = 5"),
            Err(PipelineError::ConfigParse(_))
        ));
    }

    #[test]
    fn validation() {
        let mut settings = FeatureSettings::default();
        assert!(settings.validate().is_ok());
        settings.chunk_size = 0;
        assert!(settings.validate().is_err());
        settings.chunk_size = 10;
        settings.ngram_separator.clear();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn configured_documents_resolve_in_order() {
        let config = ExtractionConfig {
            input_dir: PathBuf::from("in"),
            documents: vec!["z".into(), "a".into()],
            ..Default::default()
        };
        let docs = config.resolve_documents().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "z");
        assert_eq!(docs[1].raw_text, PathBuf::from("in/a.txt"));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ExtractionConfig::load(&dir.path().join("stylometry.toml")).unwrap_err();
        assert!(matches!(err, PipelineError::ConfigRead { .. }));
    }
}
