//! Prose splitting: paragraphs, then lines, then sentence terminators.

use super::engine::{trailing, Tier, TierSplitter};
use super::Splitter;
use crate::types::Chunk;

const CHUNK_SIZE: usize = 2500;
const OVERLAP: usize = 100;

/// Separator priority for running text. A terminator found at a coarser tier
/// always wins over finer ones.
const TIERS: &[Tier] = &[
    trailing("\n\n"),
    trailing("\n"),
    trailing(". "),
    trailing("? "),
    trailing("! "),
];

/// Splitter for plain text, PDFs, Office documents, and the unclassified
/// fallback.
pub struct ProseSplitter;

impl Splitter for ProseSplitter {
    fn split(&self, _file_type: &str, content: &str) -> Vec<Chunk> {
        TierSplitter::new(TIERS, CHUNK_SIZE, OVERLAP).split(content)
    }
}
