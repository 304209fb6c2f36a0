//! Binary signature sniffing.
//!
//! Classifies a byte buffer via fixed magic-byte patterns, independent of the
//! filename. Only the formats the pipeline routes to external text extraction
//! are recognized; anything else falls through to the extension and content
//! rules.

/// A format recognized from its byte signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffedFormat {
    Pdf,
    Docx,
    Doc,
    Pptx,
    Ppt,
}

impl SniffedFormat {
    /// Extension-style label (no leading dot), used as the detected fileType.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Doc => "doc",
            Self::Pptx => "pptx",
            Self::Ppt => "ppt",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Doc => "application/msword",
            Self::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            Self::Ppt => "application/vnd.ms-powerpoint",
        }
    }

    /// Office formats, as opposed to PDF.
    pub fn is_office(&self) -> bool {
        !matches!(self, Self::Pdf)
    }
}

/// ZIP local-file header, the container for OOXML documents.
const ZIP_MAGIC: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

/// OLE2 compound-file header, the container for legacy Office documents.
const OLE2_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Sniff a buffer's format from its leading magic bytes.
///
/// Returns `None` for unrecognized content, including containers that match a
/// magic number but not a known document layout (e.g. a plain ZIP archive).
pub fn sniff(buffer: &[u8]) -> Option<SniffedFormat> {
    if buffer.starts_with(b"%PDF-") {
        return Some(SniffedFormat::Pdf);
    }

    if buffer.starts_with(ZIP_MAGIC) {
        return sniff_ooxml(buffer);
    }

    if buffer.starts_with(OLE2_MAGIC) {
        return sniff_ole2(buffer);
    }

    None
}

/// OOXML containers are ZIP archives whose entry names identify the document
/// kind; entry names appear verbatim in the local file headers.
fn sniff_ooxml(buffer: &[u8]) -> Option<SniffedFormat> {
    if contains(buffer, b"word/") {
        return Some(SniffedFormat::Docx);
    }
    if contains(buffer, b"ppt/") {
        return Some(SniffedFormat::Pptx);
    }
    None
}

/// Legacy Office files store their stream names as UTF-16LE in the compound
/// file's directory entries.
fn sniff_ole2(buffer: &[u8]) -> Option<SniffedFormat> {
    if contains_utf16le(buffer, "WordDocument") {
        return Some(SniffedFormat::Doc);
    }
    if contains_utf16le(buffer, "PowerPoint Document") {
        return Some(SniffedFormat::Ppt);
    }
    None
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

fn contains_utf16le(haystack: &[u8], needle: &str) -> bool {
    let encoded: Vec<u8> = needle
        .encode_utf16()
        .flat_map(|unit| unit.to_le_bytes())
        .collect();
    contains(haystack, &encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
    }

    #[test]
    fn test_sniff_pdf() {
        assert_eq!(sniff(b"%PDF-1.7 rest of file"), Some(SniffedFormat::Pdf));
    }

    #[test]
    fn test_sniff_docx() {
        let mut buf = ZIP_MAGIC.to_vec();
        buf.extend_from_slice(b"\x00\x00word/document.xml");
        assert_eq!(sniff(&buf), Some(SniffedFormat::Docx));
    }

    #[test]
    fn test_sniff_pptx() {
        let mut buf = ZIP_MAGIC.to_vec();
        buf.extend_from_slice(b"\x00\x00ppt/slides/slide1.xml");
        assert_eq!(sniff(&buf), Some(SniffedFormat::Pptx));
    }

    #[test]
    fn test_sniff_plain_zip_is_not_office() {
        let mut buf = ZIP_MAGIC.to_vec();
        buf.extend_from_slice(b"\x00\x00archive-entry.txt");
        assert_eq!(sniff(&buf), None);
    }

    #[test]
    fn test_sniff_legacy_doc() {
        let mut buf = OLE2_MAGIC.to_vec();
        buf.extend_from_slice(&[0u8; 16]);
        buf.extend_from_slice(&utf16le("WordDocument"));
        assert_eq!(sniff(&buf), Some(SniffedFormat::Doc));
    }

    #[test]
    fn test_sniff_legacy_ppt() {
        let mut buf = OLE2_MAGIC.to_vec();
        buf.extend_from_slice(&[0u8; 16]);
        buf.extend_from_slice(&utf16le("PowerPoint Document"));
        assert_eq!(sniff(&buf), Some(SniffedFormat::Ppt));
    }

    #[test]
    fn test_sniff_unknown_ole2_falls_through() {
        let mut buf = OLE2_MAGIC.to_vec();
        buf.extend_from_slice(&utf16le("Workbook"));
        assert_eq!(sniff(&buf), None);
    }

    #[test]
    fn test_sniff_plain_text() {
        assert_eq!(sniff(b"hello world"), None);
        assert_eq!(sniff(b""), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(SniffedFormat::Pdf.extension(), "pdf");
        assert_eq!(SniffedFormat::Pdf.mime(), "application/pdf");
        assert!(!SniffedFormat::Pdf.is_office());
        assert!(SniffedFormat::Docx.is_office());
    }
}
