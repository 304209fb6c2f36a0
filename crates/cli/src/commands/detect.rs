//! Detect command handler.
//!
//! Classifies documents without splitting them, for inspecting what the
//! pipeline would do with a given file.

use clap::Args;
use corpora_core::AppResult;
use corpora_ingest::detect;
use std::path::PathBuf;

/// Classify documents without splitting
#[derive(Args, Debug)]
pub struct DetectCommand {
    /// Files to classify
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl DetectCommand {
    pub async fn execute(&self) -> AppResult<()> {
        let mut results = Vec::with_capacity(self.paths.len());

        for path in &self.paths {
            let bytes = tokio::fs::read(path).await?;
            let detection = detect(&path.to_string_lossy(), &bytes);
            tracing::debug!(path = %path.display(), strategy = %detection.strategy, "classified");
            results.push((path, detection));
        }

        if self.json {
            let out: Vec<_> = results
                .iter()
                .map(|(path, detection)| {
                    serde_json::json!({
                        "path": path,
                        "strategy": detection.strategy,
                        "fileType": detection.file_type,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            for (path, detection) in &results {
                let file_type = if detection.file_type.is_empty() {
                    "-"
                } else {
                    detection.file_type.as_str()
                };
                println!("{}\t{}\t{}", path.display(), detection.strategy, file_type);
            }
        }

        Ok(())
    }
}
