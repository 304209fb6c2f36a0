//! Ingestion data model: strategies, detection results, chunks, documents.

use serde::{Deserialize, Serialize};

/// Chunking algorithm family assigned to a document.
///
/// Exactly one strategy is assigned per document; the assignment is a pure,
/// deterministic function of the source path/URL and the byte content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChunkingStrategy {
    /// Source code, split at declaration boundaries
    Code,

    /// Markdown documentation, split at heading boundaries
    Markdown,

    /// Plain text, PDFs, Office documents, and the unclassified fallback
    Prose,

    /// Log files, one chunk per line
    Logs,

    /// Delimited data, one chunk per data row
    Tables,

    /// JSON/XML-shaped data, kept whole
    Structured,
}

impl ChunkingStrategy {
    /// The wire tag used in the ingestion payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "CODE",
            Self::Markdown => "MARKDOWN",
            Self::Prose => "PROSE",
            Self::Logs => "LOGS",
            Self::Tables => "TABLES",
            Self::Structured => "STRUCTURED",
        }
    }

    /// Parse a wire tag. Unknown tags return `None`; callers needing a total
    /// mapping fall back to PROSE at the split layer.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "CODE" => Some(Self::Code),
            "MARKDOWN" => Some(Self::Markdown),
            "PROSE" => Some(Self::Prose),
            "LOGS" => Some(Self::Logs),
            "TABLES" => Some(Self::Tables),
            "STRUCTURED" => Some(Self::Structured),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChunkingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of strategy detection for one document.
///
/// `file_type` is either a normalized extension (e.g. `.py`) or a sniffed
/// format label (e.g. `pdf`, `docx`, `json`, `table`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub strategy: ChunkingStrategy,

    #[serde(rename = "fileType")]
    pub file_type: String,
}

/// A contiguous unit of extracted text sized for downstream embedding.
///
/// Chunks are never empty; an algorithm that would produce an empty chunk
/// omits it instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Chunk {
    pub fn new(text: String) -> Self {
        Self {
            text,
            metadata: None,
        }
    }

    pub fn with_metadata(text: String, metadata: serde_json::Value) -> Self {
        Self {
            text,
            metadata: Some(metadata),
        }
    }
}

/// A fully ingested document, ready for the indexing collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub url: String,

    #[serde(rename = "fileType")]
    pub file_type: String,

    pub strategy: ChunkingStrategy,

    /// Full decoded text of the document
    pub content: String,

    /// Chunks in document order
    pub chunks: Vec<Chunk>,
}

/// Documents grouped under a collection name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub collection_name: String,
    pub data: Vec<Document>,
}

/// Envelope handed to the downstream indexing collaborator.
///
/// Field names and nesting are a wire contract; do not rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestPayload {
    pub data: Collection,
}

impl IngestPayload {
    /// Create an empty payload for the given collection.
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self {
            data: Collection {
                collection_name: collection_name.into(),
                data: Vec::new(),
            },
        }
    }
}
