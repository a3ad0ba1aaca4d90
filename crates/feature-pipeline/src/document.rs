use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

const RAW_SUFFIX: &str = ".txt";
const CLEAN_SUFFIX: &str = "_clean.txt";
const NOSTOPS_SUFFIX: &str = "_clean_nostops.txt";
const FEATURES_SUFFIX: &str = "_features.json";

/// One source document and the paths of its prepared artifacts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub raw_text: PathBuf,
    /// Lemmas with stopwords retained.
    pub tokens_with_stops: PathBuf,
    /// Lemmas with stopwords removed.
    pub tokens_without_stops: PathBuf,
}

impl Document {
    /// Artifacts named `<id>.txt`, `<id>_clean.txt` and
    /// `<id>_clean_nostops.txt` inside `dir`.
    pub fn in_dir(dir: &Path, id: &str) -> Self {
        Self {
            id: id.to_owned(),
            raw_text: dir.join(format!("{id}{RAW_SUFFIX}")),
            tokens_with_stops: dir.join(format!("{id}{CLEAN_SUFFIX}")),
            tokens_without_stops: dir.join(format!("{id}{NOSTOPS_SUFFIX}")),
        }
    }

    pub fn output_path(&self, out_dir: &Path) -> PathBuf {
        out_dir.join(format!("{}{FEATURES_SUFFIX}", self.id))
    }
}

/// Document ids implied by the `.txt` artifacts in `dir`, sorted.
pub fn discover_documents(dir: &Path) -> Result<Vec<String>, PipelineError> {
    let discovery_err = |source| PipelineError::Discovery { path: dir.to_path_buf(), source };
    let mut ids = BTreeSet::new();
    for entry in fs::read_dir(dir).map_err(discovery_err)? {
        let entry = entry.map_err(discovery_err)?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with('.') {
            continue;
        }
        if let Some(id) = document_id(name) {
            ids.insert(id.to_owned());
        }
    }
    Ok(ids.into_iter().collect())
}

fn document_id(file_name: &str) -> Option<&str> {
    [NOSTOPS_SUFFIX, CLEAN_SUFFIX, RAW_SUFFIX]
        .iter()
        .find_map(|suffix| file_name.strip_suffix(suffix))
        .filter(|id| !id.is_empty())
}
