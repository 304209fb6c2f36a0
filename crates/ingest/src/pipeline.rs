//! Ingestion orchestration: detect, decode, split, aggregate.
//!
//! The pipeline is thin glue over the pure core. Fetching bytes and
//! extracting text from binary formats belong to external collaborators; the
//! pipeline receives bytes, routes binary formats through the
//! [`TextExtractor`] seam, and assembles the payload for the downstream
//! indexing collaborator.

use corpora_core::{AppError, AppResult};

use crate::detect;
use crate::split;
use crate::types::{Document, IngestPayload};

/// File type labels that require the external text-extraction collaborator.
const BINARY_FORMATS: &[&str] = &["pdf", "docx", "doc", "pptx", "ppt"];

/// Seam to the external text-extraction collaborator.
///
/// The pipeline never parses binary office/PDF formats itself; it hands the
/// bytes and the detected type label to an extractor and receives
/// already-extracted text.
pub trait TextExtractor {
    fn extract(&self, file_type: &str, bytes: &[u8]) -> AppResult<String>;
}

/// Default extractor: lossy UTF-8 decoding for text content. Binary formats
/// are refused so the caller can wire a real collaborator (for example the
/// CLI's command extractor) to ingest them.
#[derive(Debug, Default)]
pub struct Utf8Extractor;

impl TextExtractor for Utf8Extractor {
    fn extract(&self, file_type: &str, bytes: &[u8]) -> AppResult<String> {
        if is_binary_format(file_type) {
            return Err(AppError::Extraction(format!(
                "no text extractor configured for binary format '{}'",
                file_type
            )));
        }
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Whether a detected file type needs external extraction before splitting.
pub fn is_binary_format(file_type: &str) -> bool {
    BINARY_FORMATS.contains(&file_type)
}

/// Ingest a single document: detect the strategy, obtain decoded text, split
/// into chunks.
pub fn ingest_bytes(
    url: &str,
    bytes: &[u8],
    extractor: &dyn TextExtractor,
) -> AppResult<Document> {
    let detection = detect::detect(url, bytes);
    tracing::debug!(
        url,
        strategy = %detection.strategy,
        file_type = %detection.file_type,
        "detected strategy"
    );

    let content = if is_binary_format(&detection.file_type) {
        extractor.extract(&detection.file_type, bytes)?
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    };

    let chunks = split::split(detection.strategy, &detection.file_type, &content);
    tracing::debug!(url, chunks = chunks.len(), "split document");

    Ok(Document {
        url: url.to_string(),
        file_type: detection.file_type,
        strategy: detection.strategy,
        content,
        chunks,
    })
}

/// Ingest a batch of already-fetched documents.
///
/// Documents are independent: one failing document is logged and skipped,
/// never aborting the rest of the batch.
pub fn ingest_batch<I>(
    inputs: I,
    extractor: &dyn TextExtractor,
    collection_name: &str,
) -> IngestPayload
where
    I: IntoIterator<Item = (String, Vec<u8>)>,
{
    let mut payload = IngestPayload::new(collection_name);

    for (url, bytes) in inputs {
        match ingest_bytes(&url, &bytes, extractor) {
            Ok(document) => payload.data.data.push(document),
            Err(error) => {
                tracing::error!(url = %url, error = %error, "skipping document");
            }
        }
    }

    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkingStrategy;

    #[test]
    fn test_ingest_text_document() {
        let doc = ingest_bytes("notes/readme.md", b"# Title\n\nBody text.", &Utf8Extractor)
            .unwrap();

        assert_eq!(doc.strategy, ChunkingStrategy::Markdown);
        assert_eq!(doc.file_type, ".md");
        assert_eq!(doc.content, "# Title\n\nBody text.");
        assert!(!doc.chunks.is_empty());
    }

    #[test]
    fn test_binary_without_extractor_fails() {
        let result = ingest_bytes("paper.pdf", b"%PDF-1.4 ...", &Utf8Extractor);
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }

    #[test]
    fn test_binary_with_extractor_uses_extracted_text() {
        struct FixedText;
        impl TextExtractor for FixedText {
            fn extract(&self, _file_type: &str, _bytes: &[u8]) -> AppResult<String> {
                Ok("Extracted paragraph one.\n\nExtracted paragraph two.".to_string())
            }
        }

        let doc = ingest_bytes("paper.pdf", b"%PDF-1.4 ...", &FixedText).unwrap();
        assert_eq!(doc.file_type, "pdf");
        assert_eq!(doc.strategy, ChunkingStrategy::Prose);
        assert!(doc.content.starts_with("Extracted paragraph one."));
        assert!(!doc.chunks.is_empty());
    }

    #[test]
    fn test_batch_skips_failing_documents() {
        let inputs = vec![
            ("good.txt".to_string(), b"plain words".to_vec()),
            ("bad.pdf".to_string(), b"%PDF-1.4 binary".to_vec()),
            ("also-good.log".to_string(), b"one\ntwo".to_vec()),
        ];

        let payload = ingest_batch(inputs, &Utf8Extractor, "knowledge-base");

        assert_eq!(payload.data.collection_name, "knowledge-base");
        assert_eq!(payload.data.data.len(), 2);
        assert_eq!(payload.data.data[0].url, "good.txt");
        assert_eq!(payload.data.data[1].url, "also-good.log");
    }
}
