//! Ingest command handler.
//!
//! Gathers documents from files, directories, and URLs, runs them through the
//! classification-and-chunking pipeline, and emits the ingestion payload on
//! stdout (diagnostics stay on stderr).

use clap::Args;
use corpora_core::{config::AppConfig, AppError, AppResult};
use corpora_ingest::{ingest_batch, TextExtractor, Utf8Extractor};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

use crate::extract::CommandExtractor;

/// Ingest documents into a chunk payload
#[derive(Args, Debug)]
pub struct IngestCommand {
    /// Files, directories, or http(s) URLs to ingest
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Include patterns for directory walks (substring match)
    #[arg(long)]
    pub include: Vec<String>,

    /// Exclude patterns for directory walks (substring match)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// External text-extraction command for binary formats;
    /// "{}" expands to the document's scratch file path
    #[arg(long)]
    pub extract_cmd: Option<String>,

    /// Write the payload to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print ingest statistics to stderr
    #[arg(long)]
    pub summary: bool,
}

/// One resolved input, fetched over HTTP or read from disk.
#[derive(Debug, Clone)]
enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// Identifier recorded as the document's `url` in the payload.
    fn id(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::File(path) => path.to_string_lossy().into_owned(),
        }
    }

    async fn load(self, client: &reqwest::Client) -> AppResult<Vec<u8>> {
        match self {
            Self::Url(url) => {
                let response = client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| AppError::Fetch(format!("{}: {}", url, e)))?;

                if !response.status().is_success() {
                    return Err(AppError::Fetch(format!(
                        "{}: HTTP {}",
                        url,
                        response.status()
                    )));
                }

                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| AppError::Fetch(format!("{}: {}", url, e)))?;
                Ok(bytes.to_vec())
            }
            Self::File(path) => Ok(tokio::fs::read(&path).await?),
        }
    }
}

impl IngestCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let start = Instant::now();

        let sources = self.resolve_sources()?;
        if sources.is_empty() {
            return Err(AppError::Ingest("no ingestable inputs found".to_string()));
        }

        tracing::info!("Ingesting {} sources", sources.len());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Fetch(format!("failed to build HTTP client: {}", e)))?;

        // Fetch/read concurrently; payload order follows input order.
        let fetched: Vec<(String, AppResult<Vec<u8>>)> =
            futures::stream::iter(sources.into_iter().map(|source| {
                let client = client.clone();
                async move {
                    let id = source.id();
                    let bytes = source.load(&client).await;
                    (id, bytes)
                }
            }))
            .buffered(config.concurrency)
            .collect()
            .await;

        let extractor: Box<dyn TextExtractor> = match self
            .extract_cmd
            .clone()
            .or_else(|| config.extract_command.clone())
        {
            Some(command) => Box::new(CommandExtractor::new(command)),
            None => Box::new(Utf8Extractor),
        };

        let total = fetched.len();
        let mut inputs = Vec::with_capacity(total);
        for (id, result) in fetched {
            match result {
                Ok(bytes) => inputs.push((id, bytes)),
                Err(error) => tracing::error!(url = %id, error = %error, "skipping document"),
            }
        }

        let payload = ingest_batch(inputs, extractor.as_ref(), &config.collection_name);

        let documents = payload.data.data.len();
        let chunks: usize = payload.data.data.iter().map(|d| d.chunks.len()).sum();
        let bytes: usize = payload.data.data.iter().map(|d| d.content.len()).sum();
        let skipped = total - documents;

        let json = serde_json::to_string_pretty(&payload)?;
        match &self.output {
            Some(path) => {
                std::fs::write(path, &json)?;
                tracing::info!("Payload written to {:?}", path);
            }
            None => println!("{}", json),
        }

        if self.summary {
            eprintln!(
                "Ingested {} documents ({} chunks, {} bytes) in {:.2}s; {} skipped",
                documents,
                chunks,
                bytes,
                start.elapsed().as_secs_f64(),
                skipped
            );
        }

        Ok(())
    }

    /// Expand inputs into concrete sources: URLs pass through, files are
    /// taken as-is, directories are walked with the include/exclude filters.
    fn resolve_sources(&self) -> AppResult<Vec<Source>> {
        let mut sources = Vec::new();

        for input in &self.inputs {
            if input.starts_with("http://") || input.starts_with("https://") {
                sources.push(Source::Url(input.clone()));
                continue;
            }

            let path = PathBuf::from(input);
            if path.is_dir() {
                for entry in WalkDir::new(&path)
                    .follow_links(false)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|e| e.ok())
                {
                    let entry_path = entry.path();
                    if entry_path.is_file() && self.should_include(entry_path) {
                        sources.push(Source::File(entry_path.to_path_buf()));
                    }
                }
            } else if path.is_file() {
                sources.push(Source::File(path));
            } else {
                tracing::warn!(input = %input, "input not found, skipping");
            }
        }

        Ok(sources)
    }

    /// Check if a walked file should be included based on patterns.
    fn should_include(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        // Check excludes first
        for pattern in &self.exclude {
            if path_str.contains(pattern.as_str()) {
                return false;
            }
        }

        // If includes are specified, must match at least one
        if !self.include.is_empty() {
            return self
                .include
                .iter()
                .any(|pattern| path_str.contains(pattern.as_str()));
        }

        true
    }
}
