use std::collections::HashSet;

pub const DEFAULT_CHUNK_SIZE: usize = 2000;

/// Distinct / total over one span.
pub fn type_token_ratio(chunk: &[String]) -> f64 {
    if chunk.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<&str> = chunk.iter().map(String::as_str).collect();
    distinct.len() as f64 / chunk.len() as f64
}

/// Mean type-token ratio over consecutive `chunk_size` spans.
///
/// A trailing span shorter than half a chunk is dropped when there is more
/// than one span; exactly half is kept.
pub fn chunked_ttr(tokens: &[String], chunk_size: usize) -> f64 {
    if tokens.is_empty() || chunk_size == 0 {
        return 0.0;
    }
    let mut chunks: Vec<&[String]> = tokens.chunks(chunk_size).collect();
    if chunks.len() > 1 && chunks.last().is_some_and(|c| c.len() * 2 < chunk_size) {
        chunks.pop();
    }
    if chunks.is_empty() {
        return 0.0;
    }
    let sum: f64 = chunks.iter().map(|c| type_token_ratio(c)).sum();
    sum / chunks.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `len` tokens cycling through `vocab` distinct types.
    fn cycling(len: usize, vocab: usize) -> Vec<String> {
        (0..len).map(|i| format!("w{}", i % vocab)).collect()
    }

    fn distinct(len: usize) -> Vec<String> {
        (0..len).map(|i| format!("u{i}")).collect()
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(chunked_ttr(&[], DEFAULT_CHUNK_SIZE), 0.0);
        assert_eq!(chunked_ttr(&distinct(10), 0), 0.0);
    }

    #[test]
    fn all_distinct_single_chunk_is_one() {
        assert_eq!(chunked_ttr(&distinct(50), 50), 1.0);
        assert_eq!(chunked_ttr(&distinct(50), DEFAULT_CHUNK_SIZE), 1.0);
    }

    #[test]
    fn short_single_chunk_is_kept() {
        // only one chunk, so the half-size rule does not apply
        let tokens = cycling(10, 5);
        assert_eq!(chunked_ttr(&tokens, 2000), 0.5);
    }

    #[test]
    fn exactly_half_trailing_chunk_is_kept() {
        // 2000 tokens over 100 types, then 1000 all-new tokens
        let mut tokens = cycling(2000, 100);
        tokens.extend(distinct(1000));
        let ttr = chunked_ttr(&tokens, 2000);
        assert!((ttr - (0.05 + 1.0) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn under_half_trailing_chunk_is_dropped() {
        let mut tokens = cycling(2000, 100);
        tokens.extend(distinct(999));
        assert!((chunked_ttr(&tokens, 2000) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn odd_chunk_size_boundary() {
        // half of 5 is 2.5: a 2-token tail goes, a 3-token tail stays
        let mut two_tail = cycling(5, 5);
        two_tail.extend(cycling(2, 1));
        assert_eq!(chunked_ttr(&two_tail, 5), 1.0);

        let mut three_tail = cycling(5, 5);
        three_tail.extend(cycling(3, 1));
        assert!((chunked_ttr(&three_tail, 5) - (1.0 + 1.0 / 3.0) / 2.0).abs() < 1e-12);
    }
}
