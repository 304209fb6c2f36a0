//! Table splitting: one chunk per data row, header context embedded.

use super::Splitter;
use crate::types::Chunk;

/// Splitter for delimited data. The first line is the header; every data row
/// becomes one chunk whose text carries the header alongside the row, so a
/// retrieved row stays interpretable on its own.
pub struct TableSplitter;

impl Splitter for TableSplitter {
    fn split(&self, _file_type: &str, content: &str) -> Vec<Chunk> {
        let mut rows = content.lines();
        let Some(header) = rows.next() else {
            return Vec::new();
        };

        rows.enumerate()
            .filter(|(_, row)| !row.trim().is_empty())
            .map(|(idx, row)| {
                Chunk::with_metadata(
                    format!("Header: {} | Data: {}", header, row),
                    serde_json::json!({ "header": header, "row": idx + 1 }),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_chunk_per_data_row() {
        let content = "a,b,c,d\n1,2,3,4\n5,6,7,8";
        let chunks = TableSplitter.split("", content);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "Header: a,b,c,d | Data: 1,2,3,4");
        assert_eq!(chunks[1].text, "Header: a,b,c,d | Data: 5,6,7,8");
    }

    #[test]
    fn test_every_chunk_carries_header() {
        let content = "name,age\nalice,30\nbob,31\ncarol,32";
        let chunks = TableSplitter.split("", content);

        assert_eq!(chunks.len(), content.lines().count() - 1);
        for chunk in &chunks {
            assert!(chunk.text.contains("name,age"));
            assert_eq!(
                chunk.metadata.as_ref().unwrap()["header"],
                serde_json::json!("name,age")
            );
        }
    }

    #[test]
    fn test_trailing_newline_produces_no_empty_chunk() {
        let content = "a,b\n1,2\n";
        let chunks = TableSplitter.split("", content);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_header_only_table() {
        let chunks = TableSplitter.split("", "a,b,c,d");
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(TableSplitter.split("", "").is_empty());
    }
}
