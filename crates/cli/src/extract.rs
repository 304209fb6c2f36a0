//! External text extraction via a configured command.
//!
//! The pipeline delegates binary formats (pdf, docx, ...) to an external
//! collaborator. This implementation pipes the document through a local
//! command such as `pdftotext`, the way extraction tools are usually wired
//! on an ingestion host.

use std::io::Write;
use std::process::{Command, Stdio};

use corpora_core::{AppError, AppResult};
use corpora_ingest::TextExtractor;

/// Runs a configured command against a scratch copy of the document and
/// takes its stdout as the extracted text.
///
/// The command string is split on whitespace; a `{}` token expands to the
/// scratch file path, otherwise the path is appended as the last argument.
/// Example: `pdftotext {} -`.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    command: String,
}

impl CommandExtractor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl TextExtractor for CommandExtractor {
    fn extract(&self, file_type: &str, bytes: &[u8]) -> AppResult<String> {
        let mut scratch = tempfile::Builder::new()
            .suffix(&format!(".{}", file_type))
            .tempfile()
            .map_err(|e| AppError::Extraction(format!("scratch file: {}", e)))?;
        scratch.write_all(bytes)?;
        scratch.flush()?;

        let scratch_path = scratch.path().to_string_lossy().into_owned();

        let mut tokens = self.command.split_whitespace();
        let program = tokens
            .next()
            .ok_or_else(|| AppError::Extraction("empty extraction command".to_string()))?;

        let mut args: Vec<String> = tokens.map(String::from).collect();
        if args.iter().any(|arg| arg == "{}") {
            for arg in &mut args {
                if arg == "{}" {
                    *arg = scratch_path.clone();
                }
            }
        } else {
            args.push(scratch_path.clone());
        }

        tracing::debug!(program, file_type, "running external extraction");

        let output = Command::new(program)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| AppError::Extraction(format!("{} failed to start: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Extraction(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
