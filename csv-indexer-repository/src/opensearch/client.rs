//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust crate.

use std::collections::BTreeMap;

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesGetSettingsParts, IndicesPutSettingsParts},
    BulkParts, OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::SearchClientConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchEngineClient;
use crate::types::{BulkAction, BulkResponse};

/// OpenSearch client.
///
/// # Example
///
/// ```ignore
/// use csv_indexer_repository::{OpenSearchClient, SearchClientConfig};
///
/// let config = SearchClientConfig::new("http://localhost:9200");
/// let client = OpenSearchClient::new(config)?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    raise_on_item_error: bool,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the configured endpoint.
    ///
    /// No request is sent; the connection is established lazily on first use.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchIndexError::ConfigurationError)` - If the endpoint is empty
    /// * `Err(SearchIndexError::ConnectionError)` - If the endpoint is not a valid URL
    ///   or the transport cannot be built
    pub fn new(config: SearchClientConfig) -> Result<Self, SearchIndexError> {
        if config.endpoint.trim().is_empty() {
            return Err(SearchIndexError::configuration(
                "search engine endpoint is required",
            ));
        }

        let parsed_url = Url::parse(&config.endpoint)
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();

        if let Some((user, pass)) = config.credentials() {
            builder = builder.auth(Credentials::Basic(user.to_string(), pass.to_string()));
        }

        let transport = builder
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            endpoint = %config.endpoint,
            authenticated = config.credentials().is_some(),
            raise_on_item_error = config.raise_on_item_error,
            "Created OpenSearch client"
        );

        Ok(Self {
            client,
            raise_on_item_error: config.raise_on_item_error,
        })
    }

    /// Build the NDJSON body of a bulk request: one action line followed by
    /// one source line per action.
    fn bulk_body(actions: &[BulkAction]) -> Vec<JsonBody<Value>> {
        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(actions.len() * 2);
        for action in actions {
            body.push(action.action_line().into());
            body.push(Value::Object(action.source.clone()).into());
        }
        body
    }

    /// Count accepted items and collect the failure reasons of rejected ones.
    fn summarize_bulk_response(response: &Value) -> (usize, Vec<String>) {
        let mut succeeded = 0;
        let mut reasons = Vec::new();

        let items = response
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for item in items {
            // Each item is keyed by its operation type ("index", "create", ...).
            let Some(status) = item.as_object().and_then(|op| op.values().next()) else {
                continue;
            };

            match status.get("error") {
                Some(err) if !err.is_null() => {
                    let reason = err
                        .get("reason")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| err.to_string());
                    reasons.push(reason);
                }
                _ => succeeded += 1,
            }
        }

        (succeeded, reasons)
    }

    /// Turn a 2xx bulk response body into the call outcome.
    ///
    /// With `raise_on_item_error`, any rejected item fails the whole call with
    /// `BulkItemsFailed`; otherwise the response reports `errors: true`
    /// alongside the number of accepted items.
    fn bulk_outcome(
        body: &Value,
        raise_on_item_error: bool,
    ) -> Result<BulkResponse, SearchIndexError> {
        let (succeeded, reasons) = Self::summarize_bulk_response(body);
        let errors = !reasons.is_empty()
            || body.get("errors").and_then(Value::as_bool).unwrap_or(false);

        if !reasons.is_empty() {
            warn!(
                succeeded = succeeded,
                failed = reasons.len(),
                raise_on_item_error = raise_on_item_error,
                "Bulk request rejected some documents"
            );
            if raise_on_item_error {
                return Err(SearchIndexError::bulk_items_failed(reasons));
            }
        }

        Ok(BulkResponse::new(succeeded, errors))
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    /// Submit actions through the `_bulk` endpoint.
    ///
    /// An empty batch returns `BulkResponse { succeeded: 0, errors: false }`
    /// without contacting the engine, since `_bulk` rejects an empty body.
    async fn bulk(&self, actions: &[BulkAction]) -> Result<BulkResponse, SearchIndexError> {
        if actions.is_empty() {
            debug!("Empty bulk batch, nothing to send");
            return Ok(BulkResponse::new(0, false));
        }

        let response = self
            .client
            .bulk(BulkParts::None)
            .body(Self::bulk_body(actions))
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk_index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchIndexError::bulk_index(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        debug!(submitted = actions.len(), "Bulk request completed");
        Self::bulk_outcome(&body, self.raise_on_item_error)
    }

    async fn get_settings(&self, index: &str) -> Result<Value, SearchIndexError> {
        let response = self
            .client
            .indices()
            .get_settings(IndicesGetSettingsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::settings(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %index, status = %status, body = %error_body, "Get settings request failed");
            return Err(SearchIndexError::settings(format!(
                "Get settings failed with status {}: {}",
                status, error_body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))
    }

    async fn put_settings(
        &self,
        index: &str,
        settings: &BTreeMap<String, String>,
    ) -> Result<(), SearchIndexError> {
        let body =
            serde_json::to_value(settings).map_err(|e| SearchIndexError::serialization(e.to_string()))?;

        let response = self
            .client
            .indices()
            .put_settings(IndicesPutSettingsParts::Index(&[index]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::settings(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %index, status = %status, body = %error_body, "Put settings request failed");
            return Err(SearchIndexError::settings(format!(
                "Put settings failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(index = %index, settings = ?settings, "Index settings updated");
        Ok(())
    }
}
