use std::fs;
use std::path::Path;

use crate::error::ArtifactError;

/// Ordered, normalized word strings as produced by the cleaning step.
pub type TokenSequence = Vec<String>;

/// Load a prepared token file, splitting on any whitespace.
pub fn read_tokens(path: &Path) -> Result<TokenSequence, ArtifactError> {
    let text = read_text(path)?;
    Ok(split_tokens(&text))
}

/// Load a raw UTF-8 text artifact as a single string.
pub fn read_text(path: &Path) -> Result<String, ArtifactError> {
    fs::read_to_string(path).map_err(|e| ArtifactError::from_io(path, e))
}

pub fn split_tokens(text: &str) -> TokenSequence {
    text.split_whitespace().map(str::to_owned).collect()
}
