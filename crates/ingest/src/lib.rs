//! Document classification and chunking pipeline.
//!
//! Raw document bytes and a source identifier go in; an ordered sequence of
//! text chunks sized for downstream embedding/indexing comes out:
//! - [`detect`]: ordered-rule strategy classification (binary signature
//!   sniffing, extension mapping, content heuristics)
//! - [`split`]: six strategy-specific chunking algorithms behind a shared
//!   dispatch
//! - [`pipeline`]: thin orchestration assembling the ingestion payload

pub mod detect;
pub mod pipeline;
pub mod split;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use detect::detect;
pub use pipeline::{ingest_batch, ingest_bytes, TextExtractor, Utf8Extractor};
pub use split::{split, split_labeled, Splitter};
pub use types::{Chunk, ChunkingStrategy, Collection, DetectionResult, Document, IngestPayload};
