//! Request and response types for bulk operations.

use csv_indexer_shared::Document;
use serde_json::{json, Value};

/// Operation type of a bulk action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOpType {
    /// Create or replace the document. The engine assigns the document ID.
    Index,
}

impl BulkOpType {
    /// The action name used on the bulk API wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            BulkOpType::Index => "index",
        }
    }
}

/// A single action in a bulk request.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkAction {
    /// The operation to perform.
    pub op_type: BulkOpType,
    /// The target index.
    pub index: String,
    /// The document body.
    pub source: Document,
}

impl BulkAction {
    /// Create an `index` action for a document.
    pub fn index(index: impl Into<String>, source: Document) -> Self {
        Self {
            op_type: BulkOpType::Index,
            index: index.into(),
            source,
        }
    }

    /// The action metadata line (e.g. `{"index": {"_index": "records"}}`).
    pub fn action_line(&self) -> Value {
        let mut line = serde_json::Map::new();
        line.insert(
            self.op_type.as_str().to_string(),
            json!({ "_index": self.index }),
        );
        Value::Object(line)
    }
}

/// Outcome of a bulk call that the engine accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkResponse {
    /// Number of documents written.
    pub succeeded: usize,
    /// Whether the engine rejected any document.
    pub errors: bool,
}

impl BulkResponse {
    /// Create a bulk response.
    pub fn new(succeeded: usize, errors: bool) -> Self {
        Self { succeeded, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv_indexer_shared::document_from_pairs;

    #[test]
    fn test_index_action_line() {
        let action = BulkAction::index("records", document_from_pairs([("a", json!("1"))]));

        assert_eq!(action.op_type, BulkOpType::Index);
        assert_eq!(action.action_line(), json!({ "index": { "_index": "records" } }));
    }
}
