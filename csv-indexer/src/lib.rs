//! # CSV Indexer
//!
//! Event-driven CSV ingest: an S3 "object created" notification triggers a
//! fetch of the CSV file, which is parsed into documents and bulk-loaded into
//! OpenSearch. Successfully loaded files can be moved to a processed bucket.
//!
//! ## Architecture
//!
//! 1. **Events**: S3 notification records naming the uploaded objects
//! 2. **Storage**: Fetches and archives objects in S3
//! 3. **Processor**: Transforms CSV content into documents
//! 4. **Loader**: Indexes documents into OpenSearch
//! 5. **Orchestrator**: Coordinates the ingest flow per record
//!
//! ## Modules
//!
//! - [`config`]: Settings and dependency initialization
//! - [`events`]: S3 notification types
//! - [`storage`]: Object store interface and S3 implementation
//! - [`processor`]: CSV to document conversion
//! - [`loader`]: Indexes documents into OpenSearch
//! - [`orchestrator`]: Coordinates the ingest flow
//! - [`telemetry`]: Tracing setup for the binaries
//! - [`errors`]: Error types for the ingest

pub mod config;
pub mod errors;
pub mod events;
pub mod loader;
pub mod orchestrator;
pub mod processor;
pub mod storage;
pub mod telemetry;

pub use config::Dependencies;
pub use errors::IngestError;
pub use events::S3Event;
pub use orchestrator::{IngestReport, Orchestrator};

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Ingest error.
    #[error("Ingest error: {0}")]
    IngestError(#[from] IngestError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_error_converts_to_indexing_error() {
        let err = IndexingError::from(IngestError::storage("Access Denied"));

        assert!(matches!(err, IndexingError::IngestError(IngestError::StorageError(_))));
        assert_eq!(err.to_string(), "Ingest error: Storage error: Access Denied");
    }

    #[test]
    fn test_config_error_message() {
        let err = IndexingError::config("OPENSEARCH_ENDPOINT is required");
        assert_eq!(err.to_string(), "Configuration error: OPENSEARCH_ENDPOINT is required");
    }
}
