//! Strategy detection for incoming documents.
//!
//! Classifies a (path-or-URL, byte-buffer) pair into a chunking strategy and
//! file type label. The decision is an ordered, first-match-wins cascade of
//! classification rules over three signals: the sniffed binary signature, the
//! normalized extension, and a short content prefix. Detection is total — the
//! final rule always resolves to PROSE.

mod sniff;

pub use sniff::SniffedFormat;

use crate::types::{ChunkingStrategy, DetectionResult};

/// Signals a classification rule may inspect.
#[derive(Debug)]
struct Probe<'a> {
    /// Original path or URL
    path: &'a str,

    /// Normalized extension: lowercased, leading dot, empty when absent
    extension: String,

    /// Binary signature match, when any
    sniffed: Option<SniffedFormat>,

    /// Raw document bytes (heuristics only read a bounded prefix)
    head: &'a [u8],
}

type Predicate = fn(&Probe) -> bool;
type Resolver = fn(&Probe) -> DetectionResult;

/// One entry in the classification cascade.
struct Rule {
    name: &'static str,
    applies: Predicate,
    resolve: Resolver,
}

const CODE_EXTENSIONS: &[&str] = &[".ts", ".js", ".py", ".go", ".java", ".cpp", ".rs"];
const MARKDOWN_EXTENSIONS: &[&str] = &[".md", ".mdx"];
const TABLE_EXTENSIONS: &[&str] = &[".csv", ".tsv"];

/// Prose extensions resolved without content inspection. `.txt` is absent on
/// purpose: bare text files continue into the content heuristics and land on
/// the PROSE default only when no JSON/table shape is found.
const PROSE_EXTENSIONS: &[&str] = &[".rtf", ".doc", ".docx", ".ppt", ".pptx"];

/// Ordered classification rules; first match wins.
const RULES: &[Rule] = &[
    Rule {
        name: "pdf-signature",
        applies: |p| p.sniffed == Some(SniffedFormat::Pdf),
        resolve: |_| DetectionResult {
            strategy: ChunkingStrategy::Prose,
            file_type: "pdf".to_string(),
        },
    },
    Rule {
        name: "office-signature",
        applies: |p| p.sniffed.is_some_and(|f| f.is_office()),
        resolve: |p| DetectionResult {
            strategy: ChunkingStrategy::Prose,
            file_type: p.sniffed.map(|f| f.extension()).unwrap_or_default().to_string(),
        },
    },
    Rule {
        name: "code-extension",
        applies: |p| CODE_EXTENSIONS.contains(&p.extension.as_str()),
        resolve: |p| DetectionResult {
            strategy: ChunkingStrategy::Code,
            file_type: p.extension.clone(),
        },
    },
    Rule {
        name: "markdown-extension",
        applies: |p| MARKDOWN_EXTENSIONS.contains(&p.extension.as_str()),
        resolve: |p| DetectionResult {
            strategy: ChunkingStrategy::Markdown,
            file_type: p.extension.clone(),
        },
    },
    Rule {
        name: "table-extension",
        applies: |p| TABLE_EXTENSIONS.contains(&p.extension.as_str()),
        resolve: |p| DetectionResult {
            strategy: ChunkingStrategy::Tables,
            file_type: p.extension.clone(),
        },
    },
    Rule {
        name: "log-extension",
        applies: |p| p.extension == ".log" || p.path.contains("syslog"),
        resolve: |p| DetectionResult {
            strategy: ChunkingStrategy::Logs,
            file_type: p.extension.clone(),
        },
    },
    Rule {
        name: "prose-extension",
        applies: |p| PROSE_EXTENSIONS.contains(&p.extension.as_str()),
        resolve: |p| DetectionResult {
            strategy: ChunkingStrategy::Prose,
            file_type: p.extension.clone(),
        },
    },
    Rule {
        name: "json-prefix",
        applies: |p| looks_like_json(p.head),
        resolve: |_| DetectionResult {
            strategy: ChunkingStrategy::Structured,
            file_type: "json".to_string(),
        },
    },
    Rule {
        name: "delimited-first-line",
        applies: |p| looks_like_table(p.head),
        resolve: |_| DetectionResult {
            strategy: ChunkingStrategy::Tables,
            file_type: "table".to_string(),
        },
    },
    Rule {
        name: "default",
        applies: |_| true,
        resolve: |p| DetectionResult {
            strategy: ChunkingStrategy::Prose,
            file_type: p.extension.clone(),
        },
    },
];

/// Classify a document into a chunking strategy and file type.
///
/// Never fails: the cascade ends in a PROSE default. A recognized binary
/// signature always overrides the extension, so mislabeled or extension-less
/// files still route to extraction.
pub fn detect(path_or_url: &str, buffer: &[u8]) -> DetectionResult {
    let probe = Probe {
        path: path_or_url,
        extension: normalize_extension(path_or_url),
        sniffed: sniff::sniff(buffer),
        head: buffer,
    };

    for rule in RULES {
        if (rule.applies)(&probe) {
            let result = (rule.resolve)(&probe);
            tracing::debug!(
                rule = rule.name,
                strategy = %result.strategy,
                file_type = %result.file_type,
                "classification rule matched"
            );
            return result;
        }
    }

    // Unreachable: the table ends with a catch-all rule.
    DetectionResult {
        strategy: ChunkingStrategy::Prose,
        file_type: probe.extension,
    }
}

/// Extract the normalized extension of the final path segment: query and
/// fragment stripped, lowercased, with leading dot. Empty when the segment
/// has no extension (dotfiles count as extension-less).
fn normalize_extension(path_or_url: &str) -> String {
    let path = path_or_url
        .split(['?', '#'])
        .next()
        .unwrap_or(path_or_url);
    let segment = path.rsplit('/').next().unwrap_or(path);

    match segment.rfind('.') {
        Some(idx) if idx > 0 => segment[idx..].to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// Fixed probe window for the JSON prefix heuristic, in bytes.
const JSON_PROBE_WINDOW: usize = 100;

/// Fixed probe window for the delimited-data heuristic, in bytes.
const TABLE_PROBE_WINDOW: usize = 500;

/// Strict lower bounds: a first line must exceed these counts to classify as
/// delimited data.
const TABLE_COMMA_THRESHOLD: usize = 3;
const TABLE_TAB_THRESHOLD: usize = 2;

fn looks_like_json(buffer: &[u8]) -> bool {
    let window = &buffer[..buffer.len().min(JSON_PROBE_WINDOW)];
    let prefix = String::from_utf8_lossy(window);
    let trimmed = prefix.trim();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

fn looks_like_table(buffer: &[u8]) -> bool {
    let window = &buffer[..buffer.len().min(TABLE_PROBE_WINDOW)];
    let text = String::from_utf8_lossy(window);
    let first_line = text.split('\n').next().unwrap_or("");

    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    commas > TABLE_COMMA_THRESHOLD || tabs > TABLE_TAB_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_extensions_win_regardless_of_content() {
        for ext in CODE_EXTENSIONS {
            let path = format!("src/app{}", ext);
            let result = detect(&path, b"{\"looks\": \"like json\"}");
            assert_eq!(result.strategy, ChunkingStrategy::Code, "for {}", ext);
            assert_eq!(result.file_type, *ext);
        }
    }

    #[test]
    fn test_extension_comparison_is_case_insensitive() {
        let result = detect("Main.PY", b"print('hi')");
        assert_eq!(result.strategy, ChunkingStrategy::Code);
        assert_eq!(result.file_type, ".py");
    }

    #[test]
    fn test_markdown_extensions() {
        assert_eq!(
            detect("README.md", b"# title").strategy,
            ChunkingStrategy::Markdown
        );
        assert_eq!(
            detect("guide.mdx", b"# title").strategy,
            ChunkingStrategy::Markdown
        );
    }

    #[test]
    fn test_table_and_log_extensions() {
        assert_eq!(
            detect("data.csv", b"whatever").strategy,
            ChunkingStrategy::Tables
        );
        assert_eq!(
            detect("data.tsv", b"whatever").strategy,
            ChunkingStrategy::Tables
        );
        assert_eq!(
            detect("app.log", b"whatever").strategy,
            ChunkingStrategy::Logs
        );
    }

    #[test]
    fn test_syslog_path_routes_to_logs() {
        let result = detect("/var/log/syslog", b"Jan 1 kernel: boot");
        assert_eq!(result.strategy, ChunkingStrategy::Logs);
        assert_eq!(result.file_type, "");
    }

    #[test]
    fn test_pdf_signature_overrides_extension() {
        let result = detect("script.py", b"%PDF-1.4 binary payload");
        assert_eq!(result.strategy, ChunkingStrategy::Prose);
        assert_eq!(result.file_type, "pdf");
    }

    #[test]
    fn test_office_signature_overrides_extension() {
        let mut buf = vec![0x50, 0x4B, 0x03, 0x04];
        buf.extend_from_slice(b"word/document.xml");
        let result = detect("mislabeled.csv", &buf);
        assert_eq!(result.strategy, ChunkingStrategy::Prose);
        assert_eq!(result.file_type, "docx");
    }

    #[test]
    fn test_json_prefix_on_unknown_extension() {
        let result = detect("payload.data", b"  {\"a\": 1}");
        assert_eq!(result.strategy, ChunkingStrategy::Structured);
        assert_eq!(result.file_type, "json");

        let result = detect("payload.data", b"[1, 2, 3]");
        assert_eq!(result.strategy, ChunkingStrategy::Structured);
    }

    #[test]
    fn test_json_prefix_applies_to_txt() {
        let result = detect("notes.txt", b"{\"a\":1}");
        assert_eq!(result.strategy, ChunkingStrategy::Structured);
        assert_eq!(result.file_type, "json");
    }

    #[test]
    fn test_plain_txt_defaults_to_prose() {
        let result = detect("notes.txt", b"just some words");
        assert_eq!(result.strategy, ChunkingStrategy::Prose);
        assert_eq!(result.file_type, ".txt");
    }

    #[test]
    fn test_comma_threshold_is_strict() {
        // 4 commas: exceeds the threshold
        let result = detect("data.bin", b"a,b,c,d,e\nrest");
        assert_eq!(result.strategy, ChunkingStrategy::Tables);
        assert_eq!(result.file_type, "table");

        // exactly 3 commas: must NOT match
        let result = detect("data.bin", b"a,b,c,d\nrest");
        assert_eq!(result.strategy, ChunkingStrategy::Prose);
    }

    #[test]
    fn test_tab_threshold_is_strict() {
        let result = detect("data.bin", b"a\tb\tc\td\nrest");
        assert_eq!(result.strategy, ChunkingStrategy::Tables);

        // exactly 2 tabs: must NOT match
        let result = detect("data.bin", b"a\tb\tc\nrest");
        assert_eq!(result.strategy, ChunkingStrategy::Prose);
    }

    #[test]
    fn test_probe_windows_are_fixed() {
        // JSON opener past the 100-byte window is ignored
        let mut buf = vec![b' '; 150];
        buf.extend_from_slice(b"{\"a\":1}");
        let result = detect("blob.data", &buf);
        assert_eq!(result.strategy, ChunkingStrategy::Prose);

        // Commas past the 500-byte window do not count for the first line
        let mut buf = vec![b'x'; 600];
        buf.extend_from_slice(b",,,,,,,,\n");
        let result = detect("blob.data", &buf);
        assert_eq!(result.strategy, ChunkingStrategy::Prose);
    }

    #[test]
    fn test_prose_extensions_without_signature() {
        for ext in PROSE_EXTENSIONS {
            let path = format!("file{}", ext);
            let result = detect(&path, b"plain words");
            assert_eq!(result.strategy, ChunkingStrategy::Prose, "for {}", ext);
            assert_eq!(result.file_type, *ext);
        }
    }

    #[test]
    fn test_default_keeps_original_extension() {
        let result = detect("page.html", b"<html><body>hi</body></html>");
        assert_eq!(result.strategy, ChunkingStrategy::Prose);
        assert_eq!(result.file_type, ".html");

        let result = detect("LICENSE", b"MIT License");
        assert_eq!(result.strategy, ChunkingStrategy::Prose);
        assert_eq!(result.file_type, "");
    }

    #[test]
    fn test_url_query_and_fragment_stripped() {
        let result = detect("https://example.com/docs/readme.md?ref=main#top", b"# hi");
        assert_eq!(result.strategy, ChunkingStrategy::Markdown);
        assert_eq!(result.file_type, ".md");
    }

    #[test]
    fn test_dotfile_has_no_extension() {
        let result = detect(".bashrc", b"export PATH=$PATH");
        assert_eq!(result.strategy, ChunkingStrategy::Prose);
        assert_eq!(result.file_type, "");
    }

    #[test]
    fn test_detection_is_deterministic() {
        let a = detect("report.csv", b"a,b,c,d\n1,2,3,4");
        let b = detect("report.csv", b"a,b,c,d\n1,2,3,4");
        assert_eq!(a, b);
    }
}
