//! Error types for the CSV indexer ingest.

use thiserror::Error;

/// Errors that can occur while ingesting an object.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Misconfigured deployment or malformed trigger (e.g., missing bucket or key).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Object storage error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Error parsing the CSV content.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl IngestError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}
