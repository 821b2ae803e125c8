//! Character-sized chunking on top of `text_splitter`.
//!
//! The splitter cuts at the highest semantic level that fits (paragraphs,
//! lines, sentences, words, then graphemes) and merges neighbours up to
//! `chunk_size` characters. Sizes are counted in `char`s, never bytes.

use text_splitter::{Characters, ChunkConfig, TextSplitter};
use tracing::trace;

use crate::errors::RagError;

pub struct ChunkSplitter {
    inner: TextSplitter<Characters>,
}

impl ChunkSplitter {
    /// # Errors
    /// `RagError::Config` if `chunk_size == 0` or the overlap does not fit
    /// inside a chunk.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, RagError> {
        if chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be > 0".into()));
        }
        let config = ChunkConfig::new(chunk_size)
            .with_overlap(chunk_overlap)
            .map_err(|e| {
                RagError::Config(format!(
                    "chunk_overlap ({chunk_overlap}) with chunk_size ({chunk_size}): {e}"
                ))
            })?;
        Ok(Self {
            inner: TextSplitter::new(config),
        })
    }

    /// Splits `text` into trimmed, non-empty chunks in document order.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let out: Vec<String> = self
            .inner
            .chunks(text)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        trace!(
            "splitter::split_text input_chars={} chunks={}",
            text.chars().count(),
            out.len()
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_a_single_chunk() {
        let s = ChunkSplitter::new(500, 0).unwrap();
        assert_eq!(s.split_text("  Computer vision.  "), vec!["Computer vision."]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let s = ChunkSplitter::new(500, 0).unwrap();
        assert!(s.split_text("").is_empty());
        assert!(s.split_text(" \n\n \n").is_empty());
    }

    #[test]
    fn chunks_never_exceed_chunk_size() {
        let text = "Computer vision is a field of artificial intelligence. ".repeat(40)
            + "\n\n"
            + &"word ".repeat(300);
        let s = ChunkSplitter::new(500, 0).unwrap();
        let chunks = s.split_text(&text);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= 500));
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn paragraphs_stay_whole_when_they_fit() {
        let text = format!("{}\n\n{}", "a".repeat(300), "b".repeat(300));
        let s = ChunkSplitter::new(500, 0).unwrap();
        assert_eq!(s.split_text(&text), vec!["a".repeat(300), "b".repeat(300)]);
    }

    #[test]
    fn unbroken_text_falls_back_to_characters() {
        let s = ChunkSplitter::new(4, 0).unwrap();
        let chunks = s.split_text("abcdefghij");
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn zero_overlap_keeps_every_word_exactly_once() {
        let words: Vec<String> = (0..200).map(|i| format!("w{i}")).collect();
        let text = words.join(" ");
        let s = ChunkSplitter::new(50, 0).unwrap();
        let rejoined: Vec<String> = s
            .split_text(&text)
            .iter()
            .flat_map(|c| c.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .collect();
        assert_eq!(rejoined, words);
    }

    #[test]
    fn overlap_repeats_words_between_neighbours() {
        let words: Vec<String> = (0..60).map(|i| format!("w{i}")).collect();
        let text = words.join(" ");
        let s = ChunkSplitter::new(30, 10).unwrap();
        let chunks = s.split_text(&text);
        let total: usize = chunks.iter().map(|c| c.split_whitespace().count()).sum();
        assert!(chunks.iter().all(|c| c.chars().count() <= 30));
        assert!(total > words.len());
    }

    #[test]
    fn multibyte_text_is_counted_in_chars() {
        let s = ChunkSplitter::new(3, 0).unwrap();
        let chunks = s.split_text("ééééé");
        assert_eq!(chunks, vec!["ééé", "éé"]);
    }

    #[test]
    fn invalid_sizes_are_rejected() {
        assert!(ChunkSplitter::new(0, 0).is_err());
        assert!(ChunkSplitter::new(5, 6).is_err());
    }
}
