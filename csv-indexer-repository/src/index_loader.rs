//! Bulk index loader.
//!
//! Submits documents to a search index as a single bulk `index` operation and
//! recovers, once, from the field-count overflow failure by raising the index's
//! `index.mapping.total_fields.limit` and retrying.

use std::collections::BTreeMap;
use std::sync::Arc;

use csv_indexer_shared::{BulkResult, Document};
use tracing::{info, instrument, warn};

use crate::errors::SearchIndexError;
use crate::field_limit::{
    is_field_overflow_error, next_total_fields_limit, parse_total_fields_limit,
    DEFAULT_TOTAL_FIELDS_LIMIT, TOTAL_FIELDS_LIMIT_SETTING,
};
use crate::interfaces::SearchEngineClient;
use crate::types::BulkAction;

/// Loads batches of documents into a search index.
///
/// Engine errors never escape `bulk_index`; they are reported through the
/// returned `BulkResult`.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use csv_indexer_repository::{IndexLoader, OpenSearchClient, SearchClientConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = OpenSearchClient::new(SearchClientConfig::new("http://localhost:9200"))?;
/// let loader = IndexLoader::new(Arc::new(client));
///
/// let result = loader.bulk_index("records", Vec::new()).await;
/// assert!(!result.errors);
/// # Ok(())
/// # }
/// ```
pub struct IndexLoader {
    client: Arc<dyn SearchEngineClient>,
}

impl IndexLoader {
    /// Create a new loader on top of a search engine client.
    pub fn new(client: Arc<dyn SearchEngineClient>) -> Self {
        Self { client }
    }

    /// Index a batch of documents into `index_name`.
    ///
    /// On a field-count overflow the loader reads the index settings, raises
    /// the ceiling to `max(2c, c + 1000, 2000)` and retries the same batch
    /// exactly once. The raised ceiling stays in place even if the retry fails.
    ///
    /// # Returns
    ///
    /// - `{indexed, errors}` when the bulk call goes through
    /// - `{indexed, errors, increased_total_fields_limit_to}` when the retry goes through
    /// - `{indexed: 0, errors: true, error, retry_error}` when remediation or the retry fails
    /// - `{indexed: 0, errors: true, error}` for any other failure
    #[instrument(skip(self, documents))]
    pub async fn bulk_index<I>(&self, index_name: &str, documents: I) -> BulkResult
    where
        I: IntoIterator<Item = Document>,
    {
        let actions: Vec<BulkAction> = documents
            .into_iter()
            .map(|doc| BulkAction::index(index_name, doc))
            .collect();

        let error = match self.client.bulk(&actions).await {
            Ok(response) => return BulkResult::completed(response.succeeded, response.errors),
            Err(e) => e.to_string(),
        };

        if !is_field_overflow_error(&error) {
            warn!(error = %error, documents = actions.len(), "Bulk index failed");
            return BulkResult::failed(error);
        }

        warn!(error = %error, "Field limit exceeded, raising the index limit");

        let new_limit = match self.raise_total_fields_limit(index_name).await {
            Ok(limit) => limit,
            Err(e) => {
                warn!(error = %e, "Could not raise the field limit");
                return BulkResult::retry_failed(error, e.to_string());
            }
        };

        match self.client.bulk(&actions).await {
            Ok(response) => {
                info!(
                    indexed = response.succeeded,
                    new_limit = new_limit,
                    "Bulk index retry succeeded"
                );
                BulkResult::completed(response.succeeded, response.errors)
                    .with_increased_limit(new_limit)
            }
            Err(e) => {
                warn!(error = %e, new_limit = new_limit, "Bulk index retry failed");
                BulkResult::retry_failed(error, e.to_string())
            }
        }
    }

    /// Read the current field-count ceiling, raise it, and return the new value.
    async fn raise_total_fields_limit(&self, index_name: &str) -> Result<u64, SearchIndexError> {
        let settings = self.client.get_settings(index_name).await?;

        let current = parse_total_fields_limit(&settings, index_name).unwrap_or_else(|| {
            warn!(
                default = DEFAULT_TOTAL_FIELDS_LIMIT,
                "No field limit found in index settings, assuming default"
            );
            DEFAULT_TOTAL_FIELDS_LIMIT
        });
        let new_limit = next_total_fields_limit(current);

        let mut update = BTreeMap::new();
        update.insert(TOTAL_FIELDS_LIMIT_SETTING.to_string(), new_limit.to_string());
        self.client.put_settings(index_name, &update).await?;

        info!(current = current, new_limit = new_limit, "Raised index field limit");
        Ok(new_limit)
    }
}
