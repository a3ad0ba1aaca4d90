use crate::annotator::Annotator;
use crate::error::AnnotatorError;

/// Mean words per sentence of raw text; `0.0` when there are no sentences.
pub fn avg_sentence_length<A: Annotator + ?Sized>(
    raw_text: &str,
    annotator: &A,
) -> Result<f64, AnnotatorError> {
    let sentences = annotator.segment_sentences(raw_text)?;
    if sentences.is_empty() {
        return Ok(0.0);
    }
    let mut words = 0usize;
    for sentence in &sentences {
        words += annotator.tokenize_words(sentence)?.len();
    }
    Ok(words as f64 / sentences.len() as f64)
}
