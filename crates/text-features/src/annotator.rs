//! Seam to the linguistic annotator.
//!
//! Segmentation and tagging are supplied from outside the feature passes.
//! [`RuleAnnotator`] is a small punctuation/lexicon implementation for when
//! no morphological engine is wired in.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::AnnotatorError;

/// Stateless, reentrant linguistic services shared by every pass.
pub trait Annotator: Send + Sync {
    fn segment_sentences(&self, text: &str) -> Result<Vec<String>, AnnotatorError>;

    fn tokenize_words(&self, sentence: &str) -> Result<Vec<String>, AnnotatorError>;

    /// Tag from the highest-ranked analysis, `None` when unresolvable.
    fn tag_part_of_speech(&self, token: &str) -> Result<Option<String>, AnnotatorError>;
}

impl<A: Annotator + ?Sized> Annotator for &A {
    fn segment_sentences(&self, text: &str) -> Result<Vec<String>, AnnotatorError> {
        (**self).segment_sentences(text)
    }

    fn tokenize_words(&self, sentence: &str) -> Result<Vec<String>, AnnotatorError> {
        (**self).tokenize_words(sentence)
    }

    fn tag_part_of_speech(&self, token: &str) -> Result<Option<String>, AnnotatorError> {
        (**self).tag_part_of_speech(token)
    }
}

/// token -> ranked tag analyses.
#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    analyses: HashMap<String, Vec<String>>,
}

impl Lexicon {
    /// Parse `token<TAB>tag` lines. A token listed more than once keeps its
    /// analyses in file order. Blank lines and `#` comments are ignored.
    pub fn parse(text: &str) -> Self {
        let mut lexicon = Lexicon::default();
        let mut malformed = 0usize;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('\t') {
                Some((token, tag)) if !token.trim().is_empty() && !tag.trim().is_empty() => {
                    lexicon.insert(token.trim(), tag.trim());
                }
                _ => malformed += 1,
            }
        }
        if malformed > 0 {
            warn!(malformed, "skipped malformed lexicon lines");
        }
        lexicon
    }

    pub fn load(path: &Path) -> Result<Self, AnnotatorError> {
        let text = fs::read_to_string(path).map_err(|source| AnnotatorError::Lexicon {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::parse(&text);
        debug!(path = %path.display(), entries = lexicon.len(), "loaded lexicon");
        Ok(lexicon)
    }

    pub fn insert(&mut self, token: &str, tag: &str) {
        self.analyses.entry(token.to_owned()).or_default().push(tag.to_owned());
    }

    pub fn best_tag(&self, token: &str) -> Option<&str> {
        self.analyses.get(token).and_then(|tags| tags.first()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.analyses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyses.is_empty()
    }
}

const SENTENCE_END: &str = r#"[.!?…]+["'»”)\]]*(?:\s+|$)"#;
const WORD: &str = r"\w+(?:[-']\w+)*|[^\w\s]";

/// Terminal-punctuation sentence splitter, word/punctuation tokenizer and
/// lexicon tagger.
#[derive(Clone, Debug)]
pub struct RuleAnnotator {
    sentence_end: Regex,
    word: Regex,
    lexicon: Lexicon,
}

impl RuleAnnotator {
    pub fn new(lexicon: Lexicon) -> Result<Self, AnnotatorError> {
        Ok(Self {
            sentence_end: Regex::new(SENTENCE_END)?,
            word: Regex::new(WORD)?,
            lexicon,
        })
    }
}

impl Annotator for RuleAnnotator {
    fn segment_sentences(&self, text: &str) -> Result<Vec<String>, AnnotatorError> {
        let mut sentences = Vec::new();
        let mut push = |s: &str| {
            let s = s.trim();
            if !s.is_empty() {
                sentences.push(s.to_owned());
            }
        };
        let mut start = 0;
        for m in self.sentence_end.find_iter(text) {
            push(&text[start..m.end()]);
            start = m.end();
        }
        push(&text[start..]);
        Ok(sentences)
    }

    fn tokenize_words(&self, sentence: &str) -> Result<Vec<String>, AnnotatorError> {
        Ok(self.word.find_iter(sentence).map(|m| m.as_str().to_owned()).collect())
    }

    fn tag_part_of_speech(&self, token: &str) -> Result<Option<String>, AnnotatorError> {
        let tag = self
            .lexicon
            .best_tag(token)
            .or_else(|| self.lexicon.best_tag(&token.to_lowercase()));
        Ok(tag.map(str::to_owned))
    }
}
