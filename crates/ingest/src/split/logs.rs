//! Log splitting: one chunk per line.

use super::Splitter;
use crate::types::Chunk;

/// Splitter for log files. Blank and whitespace-only lines are dropped; the
/// remaining lines become one chunk each, in source order.
pub struct LogSplitter;

impl Splitter for LogSplitter {
    fn split(&self, _file_type: &str, content: &str) -> Vec<Chunk> {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                Chunk::with_metadata(line.to_string(), serde_json::json!({ "line": idx + 1 }))
            })
            .collect()
    }
}
