//! Search engine client trait definition.
//!
//! This module defines the abstract interface the index loader talks to,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.)
//! and mock implementations in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchIndexError;
use crate::types::{BulkAction, BulkResponse};

/// Abstracts the underlying search engine (OpenSearch, Elasticsearch, etc.).
///
/// Implementations are constructed once per process and injected into the
/// `IndexLoader` as `Arc<dyn SearchEngineClient>`.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Submit a batch of actions through the engine's bulk API.
    ///
    /// # Arguments
    ///
    /// * `actions` - The actions to submit, in order
    ///
    /// # Returns
    ///
    /// * `Ok(BulkResponse)` - The number of accepted documents and whether any were rejected
    /// * `Err(SearchIndexError)` - If the bulk call failed
    async fn bulk(&self, actions: &[BulkAction]) -> Result<BulkResponse, SearchIndexError>;

    /// Read the current settings of an index.
    ///
    /// The shape of the returned JSON is backend specific.
    async fn get_settings(&self, index: &str) -> Result<Value, SearchIndexError>;

    /// Apply setting changes to an index.
    ///
    /// # Arguments
    ///
    /// * `index` - The index to update
    /// * `settings` - Dotted setting names mapped to string values
    ///   (e.g. `"index.mapping.total_fields.limit" => "2000"`)
    async fn put_settings(
        &self,
        index: &str,
        settings: &BTreeMap<String, String>,
    ) -> Result<(), SearchIndexError>;
}
