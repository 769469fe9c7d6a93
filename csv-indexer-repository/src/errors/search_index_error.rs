//! Search index error types.
//!
//! This module defines the unified error type for all search engine operations,
//! from client construction through bulk writes and settings changes.

use thiserror::Error;

/// Unified errors from search engine operations.
///
/// Used by the `SearchEngineClient` trait and its implementations. The
/// `Display` text of bulk errors carries the engine's own failure reasons,
/// which is what the index loader inspects to decide on remediation.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Missing or invalid client configuration (e.g., no endpoint).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Failed to establish connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The bulk request as a whole failed.
    #[error("Bulk index error: {0}")]
    BulkIndexError(String),

    /// The bulk request was accepted but some documents were rejected.
    #[error("{failed} document(s) failed to index: {}", .reasons.join("; "))]
    BulkItemsFailed { failed: usize, reasons: Vec<String> },

    /// Failed to read or update index settings.
    #[error("Settings error: {0}")]
    SettingsError(String),

    /// Failed to parse response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize data for the search engine.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SearchIndexError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a bulk index error.
    pub fn bulk_index(msg: impl Into<String>) -> Self {
        Self::BulkIndexError(msg.into())
    }

    /// Create an error for per-document bulk failures.
    pub fn bulk_items_failed(reasons: Vec<String>) -> Self {
        Self::BulkItemsFailed {
            failed: reasons.len(),
            reasons,
        }
    }

    /// Create a settings error.
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::SettingsError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_items_failed_lists_reasons() {
        let err = SearchIndexError::bulk_items_failed(vec![
            "Limit of total fields [1000] in index [records] has been exceeded".to_string(),
            "mapper_parsing_exception".to_string(),
        ]);

        assert_eq!(
            err.to_string(),
            "2 document(s) failed to index: Limit of total fields [1000] in index [records] has been exceeded; mapper_parsing_exception"
        );
    }

    #[test]
    fn test_bulk_index_error_keeps_engine_text() {
        let err = SearchIndexError::bulk_index("Limit of total fields [1000] has been exceeded");
        assert!(err.to_string().contains("Limit of total fields"));
    }
}
