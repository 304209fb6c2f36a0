//! Markdown splitting: heading boundaries first, then paragraphs and lines.

use super::engine::{leading, trailing, Tier, TierSplitter};
use super::Splitter;
use crate::types::Chunk;

const CHUNK_SIZE: usize = 800;
const OVERLAP: usize = 50;

/// Heading markers attach to the following piece so a section keeps its
/// header; paragraph and line breaks terminate the preceding piece.
const TIERS: &[Tier] = &[
    leading("\n# "),
    leading("\n## "),
    leading("\n### "),
    leading("\n#### "),
    leading("\n##### "),
    leading("\n###### "),
    trailing("\n\n"),
    trailing("\n"),
];

/// Splitter for markdown documentation.
pub struct MarkdownSplitter;

impl Splitter for MarkdownSplitter {
    fn split(&self, _file_type: &str, content: &str) -> Vec<Chunk> {
        TierSplitter::new(TIERS, CHUNK_SIZE, OVERLAP).split(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_document_is_one_chunk() {
        let text = "# Title\n\nA single short section.";
        let chunks = MarkdownSplitter.split("", text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
    }

    #[test]
    fn test_splits_at_heading_boundaries() {
        let section = format!("Some documentation text. {}", "word ".repeat(120));
        let text = format!(
            "# First\n{s}\n# Second\n{s}\n# Third\n{s}",
            s = section.trim_end()
        );
        let chunks = MarkdownSplitter.split("", &text);

        assert!(chunks.len() > 1);
        // Section bodies exceed the chunk size alone, so each heading marker
        // must open a fresh piece rather than be cut through.
        assert!(chunks
            .iter()
            .any(|c| c.text.contains("\n# Second") || c.text.starts_with("# Second")));
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= CHUNK_SIZE);
        }
    }

    #[test]
    fn test_overlap_reconstruction() {
        let text = format!(
            "# Guide\n\n{}\n\n## Details\n\n{}",
            "Introductory prose for the guide. ".repeat(40),
            "Detailed prose for the section. ".repeat(40)
        );
        let chunks = MarkdownSplitter.split("", &text);
        assert!(chunks.len() > 1);

        let mut rebuilt = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                rebuilt.push_str(&chunk.text);
            } else {
                let skip = chunk
                    .text
                    .char_indices()
                    .nth(OVERLAP)
                    .map(|(idx, _)| idx)
                    .unwrap_or(chunk.text.len());
                rebuilt.push_str(&chunk.text[skip..]);
            }
        }
        assert_eq!(rebuilt, text);
    }
}
