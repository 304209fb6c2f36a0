//! Strategy-specific content splitters.
//!
//! Each of the six chunking strategies maps to one algorithm behind the
//! shared [`Splitter`] trait, so every algorithm is independently testable
//! and the dispatch stays a flat lookup.

mod code;
mod engine;
mod logs;
mod markdown;
mod prose;
mod structured;
mod tables;

pub use code::CodeSplitter;
pub use logs::LogSplitter;
pub use markdown::MarkdownSplitter;
pub use prose::ProseSplitter;
pub use structured::StructuredSplitter;
pub use tables::TableSplitter;

use crate::types::{Chunk, ChunkingStrategy};

/// Shared capability implemented by every chunking algorithm.
pub trait Splitter {
    /// Split decoded text into ordered chunks. Total: never fails, and never
    /// emits an empty chunk.
    fn split(&self, file_type: &str, content: &str) -> Vec<Chunk>;
}

/// Select the algorithm implementing the given strategy.
fn splitter_for(strategy: ChunkingStrategy) -> &'static dyn Splitter {
    match strategy {
        ChunkingStrategy::Code => &CodeSplitter,
        ChunkingStrategy::Markdown => &MarkdownSplitter,
        ChunkingStrategy::Prose => &ProseSplitter,
        ChunkingStrategy::Logs => &LogSplitter,
        ChunkingStrategy::Tables => &TableSplitter,
        ChunkingStrategy::Structured => &StructuredSplitter,
    }
}

/// Split decoded text under the given strategy.
pub fn split(strategy: ChunkingStrategy, file_type: &str, content: &str) -> Vec<Chunk> {
    splitter_for(strategy).split(file_type, content)
}

/// Split using a string strategy tag, as carried on the wire. Unrecognized
/// tags are a defensive-fallback condition resolved to PROSE, not an error.
pub fn split_labeled(strategy: &str, file_type: &str, content: &str) -> Vec<Chunk> {
    let resolved = ChunkingStrategy::from_label(strategy).unwrap_or_else(|| {
        tracing::debug!(strategy, "unrecognized strategy tag, falling back to PROSE");
        ChunkingStrategy::Prose
    });
    split(resolved, file_type, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_reaches_each_algorithm() {
        let logs = split(ChunkingStrategy::Logs, ".log", "a\nb");
        assert_eq!(logs.len(), 2);

        let tables = split(ChunkingStrategy::Tables, ".csv", "h1,h2\nv1,v2");
        assert_eq!(tables.len(), 1);

        let structured = split(ChunkingStrategy::Structured, "json", "{}");
        assert_eq!(structured.len(), 1);

        let prose = split(ChunkingStrategy::Prose, ".txt", "hello world");
        assert_eq!(prose.len(), 1);
    }

    #[test]
    fn test_split_labeled_known_tag() {
        let chunks = split_labeled("LOGS", ".log", "one\ntwo\nthree");
        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn test_split_labeled_unknown_tag_falls_back_to_prose() {
        let content = "Some prose content.";
        let fallback = split_labeled("SEMANTIC", "", content);
        let prose = split(ChunkingStrategy::Prose, "", content);
        assert_eq!(fallback, prose);
    }

    #[test]
    fn test_split_is_deterministic() {
        let content = "Paragraph one.\n\nParagraph two.\n\nParagraph three.";
        let a = split(ChunkingStrategy::Prose, ".txt", content);
        let b = split(ChunkingStrategy::Prose, ".txt", content);
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_strategy_emits_empty_chunks() {
        let inputs = ["", "\n\n", "  \n  \n", "x"];
        let strategies = [
            ChunkingStrategy::Code,
            ChunkingStrategy::Markdown,
            ChunkingStrategy::Prose,
            ChunkingStrategy::Logs,
            ChunkingStrategy::Tables,
            ChunkingStrategy::Structured,
        ];

        for strategy in strategies {
            for input in inputs {
                for chunk in split(strategy, "", input) {
                    assert!(!chunk.text.is_empty(), "{:?} on {:?}", strategy, input);
                }
            }
        }
    }
}
