//! Structured data splitting.
//!
//! JSON/XML-shaped documents are kept whole for now; structure-aware
//! splitting is a deliberate placeholder policy.

use super::Splitter;
use crate::types::Chunk;

/// Splitter for structured data: the whole document as a single verbatim
/// chunk.
pub struct StructuredSplitter;

impl Splitter for StructuredSplitter {
    fn split(&self, _file_type: &str, content: &str) -> Vec<Chunk> {
        if content.is_empty() {
            return Vec::new();
        }
        vec![Chunk::new(content.to_string())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_document_verbatim() {
        let content = "{\"a\": 1, \"b\": [2, 3]}";
        let chunks = StructuredSplitter.split("json", content);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, content);
    }

    #[test]
    fn test_empty_input_yields_no_chunk() {
        assert!(StructuredSplitter.split("json", "").is_empty());
    }
}
