//! Document type for the search index.
//!
//! A document is a mapping from column name to JSON value. Values are
//! strings, numbers, `null` (for empty cells) or nested objects (for collapsed
//! overflow columns). Key order is not significant: it does not follow the CSV
//! column order, and two documents with the same fields compare equal.

use serde_json::{Map, Value};

/// A single record as it is submitted to the search engine.
pub type Document = Map<String, Value>;

/// Build a document from `(field, value)` pairs.
///
/// Later pairs overwrite earlier ones with the same field name, so the result
/// always has unique keys.
///
/// # Example
///
/// ```
/// use csv_indexer_shared::document_from_pairs;
/// use serde_json::json;
///
/// let doc = document_from_pairs([("a", json!("1")), ("b", json!(null))]);
/// assert_eq!(doc["a"], "1");
/// assert!(doc["b"].is_null());
/// ```
pub fn document_from_pairs<K, I>(pairs: I) -> Document
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_duplicate_keys_keep_last_value() {
        let doc = document_from_pairs([("a", json!("1")), ("a", json!("2"))]);

        assert_eq!(doc.len(), 1);
        assert_eq!(doc["a"], "2");
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let doc = document_from_pairs([
            ("name", json!("widget")),
            ("extra_columns", json!({ "c1001": "x" })),
        ]);

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({ "name": "widget", "extra_columns": { "c1001": "x" } })
        );
    }

    #[test]
    fn test_field_order_is_not_significant() {
        let by_column = document_from_pairs([("zeta", json!("1")), ("alpha", json!("2"))]);
        let by_name = document_from_pairs([("alpha", json!("2")), ("zeta", json!("1"))]);

        assert_eq!(by_column, by_name);
    }
}
