//! Configuration types for the search engine client.

use crate::errors::SearchIndexError;

/// Environment variable holding the search engine URL.
pub const ENDPOINT_ENV: &str = "OPENSEARCH_ENDPOINT";

/// Environment variable holding the basic auth user name.
pub const USER_ENV: &str = "OPENSEARCH_USER";

/// Environment variable holding the basic auth password.
pub const PASSWORD_ENV: &str = "OPENSEARCH_PASS";

/// Environment variable toggling `raise_on_item_error`.
pub const RAISE_ON_ITEM_ERROR_ENV: &str = "OPENSEARCH_RAISE_ON_ITEM_ERROR";

/// Connection settings for the search engine client.
#[derive(Debug, Clone)]
pub struct SearchClientConfig {
    /// The search engine URL (e.g., "http://localhost:9200").
    pub endpoint: String,
    /// Basic auth user name. Only used together with `password`.
    pub username: Option<String>,
    /// Basic auth password. Only used together with `username`.
    pub password: Option<String>,
    /// Fail the whole bulk call when the engine rejects individual documents.
    ///
    /// When `false`, per-document rejections are only reported through
    /// `BulkResponse::errors`. Defaults to `true`.
    pub raise_on_item_error: bool,
}

impl SearchClientConfig {
    /// Create a config for an endpoint without credentials.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: None,
            password: None,
            raise_on_item_error: true,
        }
    }

    /// Set basic auth credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set whether per-document rejections fail the bulk call.
    pub fn with_raise_on_item_error(mut self, raise: bool) -> Self {
        self.raise_on_item_error = raise;
        self
    }

    /// The basic auth pair, if both parts are set and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        }
    }

    /// Load the config from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_ENDPOINT`: Search engine URL (required)
    /// - `OPENSEARCH_USER` / `OPENSEARCH_PASS`: Basic auth credentials (optional)
    /// - `OPENSEARCH_RAISE_ON_ITEM_ERROR`: "false" to report per-document failures as data (default: true)
    ///
    /// # Returns
    ///
    /// * `Ok(SearchClientConfig)` - The loaded config
    /// * `Err(SearchIndexError::ConfigurationError)` - If the endpoint is missing
    pub fn from_env() -> Result<Self, SearchIndexError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the config through a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SearchIndexError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(ENDPOINT_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                SearchIndexError::configuration(format!(
                    "{} environment variable is required",
                    ENDPOINT_ENV
                ))
            })?;

        let raise_on_item_error = match lookup(RAISE_ON_ITEM_ERROR_ENV) {
            Some(v) => !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no"),
            None => true,
        };

        Ok(Self {
            endpoint,
            username: lookup(USER_ENV),
            password: lookup(PASSWORD_ENV),
            raise_on_item_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_missing_endpoint_is_configuration_error() {
        let result = SearchClientConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(
            result.unwrap_err(),
            SearchIndexError::ConfigurationError(_)
        ));
    }

    #[test]
    fn test_blank_endpoint_is_configuration_error() {
        let result = SearchClientConfig::from_lookup(lookup_from(&[(ENDPOINT_ENV, "  ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = SearchClientConfig::from_lookup(lookup_from(&[
            (ENDPOINT_ENV, "http://localhost:9200"),
            (USER_ENV, "admin"),
            (PASSWORD_ENV, "secret"),
            (RAISE_ON_ITEM_ERROR_ENV, "false"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint, "http://localhost:9200");
        assert_eq!(config.credentials(), Some(("admin", "secret")));
        assert!(!config.raise_on_item_error);
    }

    #[test]
    fn test_credentials_require_both_parts() {
        let config = SearchClientConfig::from_lookup(lookup_from(&[
            (ENDPOINT_ENV, "http://localhost:9200"),
            (USER_ENV, "admin"),
        ]))
        .unwrap();

        assert!(config.credentials().is_none());
        assert!(config.raise_on_item_error);
    }
}
