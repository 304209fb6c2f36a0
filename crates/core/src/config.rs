//! Configuration management for the corpora CLI.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Environment variables
//! - Command-line flags
//! - Config files (.corpora/config.yaml)
//!
//! Precedence is defaults < config file < environment < CLI flags.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Main application configuration.
///
/// This struct holds all global configuration options that affect
/// CLI behavior across commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .corpora/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Collection name stamped into the ingestion payload
    pub collection_name: String,

    /// HTTP timeout for document fetches, in seconds
    pub timeout_secs: u64,

    /// Number of documents processed concurrently
    pub concurrency: usize,

    /// External text-extraction command for binary formats (pdf, docx, ...)
    pub extract_command: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    ingest: Option<IngestConfig>,
    workspace: Option<WorkspaceConfig>,
    logging: Option<LoggingConfig>,
}

/// Ingestion settings from config.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IngestConfig {
    #[serde(rename = "collectionName")]
    collection_name: Option<String>,

    #[serde(rename = "timeoutSecs")]
    timeout_secs: Option<u64>,

    concurrency: Option<usize>,

    #[serde(rename = "extractCommand")]
    extract_command: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            collection_name: "knowledge-base".to_string(),
            timeout_secs: 30,
            concurrency: 4,
            extract_command: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `CORPORA_WORKSPACE`: Override workspace path
    /// - `CORPORA_CONFIG`: Path to config file
    /// - `CORPORA_COLLECTION`: Collection name for the ingestion payload
    /// - `CORPORA_EXTRACT_CMD`: External text-extraction command
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use corpora_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Collection: {}", config.collection_name);
    /// ```
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        // Load from environment variables
        if let Ok(workspace) = std::env::var("CORPORA_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("CORPORA_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Validate workspace exists
        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        // Load from YAML config file if it exists
        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            config.workspace.join(".corpora/config.yaml")
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
            tracing::debug!("Merged config file {:?}", config_path);
        }

        // Environment variables override YAML config
        if let Ok(collection) = std::env::var("CORPORA_COLLECTION") {
            config.collection_name = collection;
        }

        if let Ok(cmd) = std::env::var("CORPORA_EXTRACT_CMD") {
            config.extract_command = Some(cmd);
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        // Check for NO_COLOR environment variable
        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        // Merge workspace settings
        if let Some(ws) = config_file.workspace {
            if let Some(path) = ws.path {
                result.workspace = PathBuf::from(path);
            }
        }

        // Merge logging settings
        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        // Merge ingestion settings
        if let Some(ingest) = config_file.ingest {
            if let Some(collection) = ingest.collection_name {
                result.collection_name = collection;
            }
            if let Some(timeout) = ingest.timeout_secs {
                result.timeout_secs = timeout;
            }
            if let Some(concurrency) = ingest.concurrency {
                result.concurrency = concurrency;
            }
            if let Some(cmd) = ingest.extract_command {
                result.extract_command = Some(cmd);
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        collection: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(collection) = collection {
            self.collection_name = collection;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .corpora directory.
    pub fn corpora_dir(&self) -> PathBuf {
        self.workspace.join(".corpora")
    }

    /// Validate configuration values.
    pub fn validate(&self) -> AppResult<()> {
        if self.collection_name.trim().is_empty() {
            return Err(AppError::Config(
                "Collection name must not be empty".to_string(),
            ));
        }

        if self.concurrency == 0 {
            return Err(AppError::Config(
                "Concurrency must be at least 1".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(AppError::Config(
                "Fetch timeout must be at least 1 second".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.collection_name, "knowledge-base");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.concurrency, 4);
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_corpora_dir() {
        let config = AppConfig::default();
        let dir = config.corpora_dir();
        assert!(dir.ends_with(".corpora"));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            None,
            None,
            Some("docs".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.collection_name, "docs");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_validate_empty_collection() {
        let mut config = AppConfig::default();
        config.collection_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_concurrency() {
        let mut config = AppConfig::default();
        config.concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_yaml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "ingest:\n  collectionName: handbook\n  timeoutSecs: 10\nlogging:\n  level: warn\n  color: false"
        )
        .unwrap();

        let mut config = AppConfig::default();
        let merged = config.merge_yaml(&path).unwrap();

        assert_eq!(merged.collection_name, "handbook");
        assert_eq!(merged.timeout_secs, 10);
        assert_eq!(merged.log_level, Some("warn".to_string()));
        assert!(merged.no_color);
    }
}
