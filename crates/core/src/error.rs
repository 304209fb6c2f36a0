//! Error types for the corpora ingestion pipeline.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, I/O, document fetch, text extraction,
//! and ingestion errors.

use thiserror::Error;

/// Unified error type for the corpora pipeline.
///
/// All fallible functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document fetch errors (network, HTTP status)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Text extraction errors (binary formats delegated to an external tool)
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Ingestion pipeline errors
    #[error("Ingest error: {0}")]
    Ingest(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
