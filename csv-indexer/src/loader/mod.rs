//! Loader module for the CSV indexer ingest.
//!
//! Loads processed documents into the configured search index.

use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use csv_indexer_repository::{IndexLoader, SearchEngineClient};
use csv_indexer_shared::{BulkResult, Document};

/// Loader that indexes documents into one search index.
///
/// Failures are reported through the returned `BulkResult` and logged here;
/// the loader never returns an error.
pub struct SearchLoader {
    loader: IndexLoader,
    index_name: String,
}

impl SearchLoader {
    /// Create a new search loader writing to `index_name`.
    pub fn new(client: Arc<dyn SearchEngineClient>, index_name: impl Into<String>) -> Self {
        Self {
            loader: IndexLoader::new(client),
            index_name: index_name.into(),
        }
    }

    /// The index documents are written to.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Load a batch of documents.
    #[instrument(skip(self, documents), fields(index = %self.index_name, documents = documents.len()))]
    pub async fn load(&self, documents: Vec<Document>) -> BulkResult {
        let count = documents.len();
        let result = self.loader.bulk_index(&self.index_name, documents).await;

        match (&result.error, &result.retry_error) {
            (Some(err), Some(retry_err)) => error!(
                error = %err,
                retry_error = %retry_err,
                documents = count,
                "Bulk index failed after raising the field limit"
            ),
            (Some(err), None) => error!(error = %err, documents = count, "Bulk index failed"),
            _ if result.errors => warn!(
                indexed = result.indexed,
                documents = count,
                "Bulk index completed with some failures"
            ),
            _ => info!(
                indexed = result.indexed,
                increased_total_fields_limit_to = ?result.increased_total_fields_limit_to,
                "Bulk index completed"
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use csv_indexer_repository::{BulkAction, BulkResponse, SearchIndexError};
    use csv_indexer_shared::document_from_pairs;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Mock client that accepts every document and records the target index.
    struct MockSearchClient {
        indexes: Mutex<Vec<String>>,
    }

    impl MockSearchClient {
        fn new() -> Self {
            Self {
                indexes: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SearchEngineClient for MockSearchClient {
        async fn bulk(&self, actions: &[BulkAction]) -> Result<BulkResponse, SearchIndexError> {
            let mut indexes = self.indexes.lock().unwrap();
            indexes.extend(actions.iter().map(|a| a.index.clone()));
            Ok(BulkResponse::new(actions.len(), false))
        }

        async fn get_settings(&self, _index: &str) -> Result<Value, SearchIndexError> {
            Ok(json!({}))
        }

        async fn put_settings(
            &self,
            _index: &str,
            _settings: &BTreeMap<String, String>,
        ) -> Result<(), SearchIndexError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_load_targets_configured_index() {
        let client = Arc::new(MockSearchClient::new());
        let loader = SearchLoader::new(client.clone(), "covid");

        let docs = vec![
            document_from_pairs([("a", json!("1"))]),
            document_from_pairs([("a", json!("2"))]),
        ];
        let result = loader.load(docs).await;

        assert_eq!(result, BulkResult::completed(2, false));
        assert_eq!(loader.index_name(), "covid");
        assert_eq!(*client.indexes.lock().unwrap(), vec!["covid", "covid"]);
    }

    #[tokio::test]
    async fn test_load_empty_batch() {
        let client = Arc::new(MockSearchClient::new());
        let loader = SearchLoader::new(client, "records");

        let result = loader.load(Vec::new()).await;

        assert_eq!(result.indexed, 0);
        assert!(!result.errors);
    }
}
