//! Outcome record of a bulk load.

use serde::{Deserialize, Serialize};

/// Result of submitting one batch of documents to the search index.
///
/// `indexed` and `errors` are always present. The remaining fields only appear
/// when they apply:
///
/// - `increased_total_fields_limit_to`: the new field-count ceiling, when the
///   overflow remediation ran and the retry went through
/// - `error`: the text of the failed bulk call
/// - `retry_error`: the text of the failed retry after remediation
///
/// Whenever `error` is set, `errors` is `true`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkResult {
    /// Number of documents the engine accepted.
    pub indexed: usize,
    /// Whether any error occurred.
    pub errors: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub increased_total_fields_limit_to: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_error: Option<String>,
}

impl BulkResult {
    /// A completed bulk call.
    pub fn completed(indexed: usize, errors: bool) -> Self {
        Self {
            indexed,
            errors,
            ..Default::default()
        }
    }

    /// A bulk call that failed outright. Nothing was indexed.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            indexed: 0,
            errors: true,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// A bulk call that failed, was remediated, and failed again on retry.
    pub fn retry_failed(error: impl Into<String>, retry_error: impl Into<String>) -> Self {
        Self {
            retry_error: Some(retry_error.into()),
            ..Self::failed(error)
        }
    }

    /// Record the field-count ceiling applied before a successful retry.
    pub fn with_increased_limit(mut self, limit: u64) -> Self {
        self.increased_total_fields_limit_to = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_completed_serializes_required_fields_only() {
        let result = BulkResult::completed(2, false);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "indexed": 2, "errors": false })
        );
    }

    #[test]
    fn test_increased_limit_is_serialized() {
        let result = BulkResult::completed(2, false).with_increased_limit(2000);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "indexed": 2, "errors": false, "increased_total_fields_limit_to": 2000 })
        );
    }

    #[test]
    fn test_failed_sets_errors_flag() {
        let result = BulkResult::failed("boom");
        assert!(result.errors);
        assert_eq!(result.indexed, 0);
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert!(result.retry_error.is_none());
    }

    #[test]
    fn test_retry_failed_keeps_both_errors() {
        let result = BulkResult::retry_failed("first", "second");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "indexed": 0, "errors": true, "error": "first", "retry_error": "second" })
        );
    }
}
