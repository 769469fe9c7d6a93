//! Ingest settings loaded from environment variables.

use std::env;

use tracing::warn;

use crate::processor::{CsvOptions, OverflowStrategy, DEFAULT_FIELD_LIMIT};

/// Default target index name.
pub const DEFAULT_INDEX_NAME: &str = "records";

/// Object storage connection settings.
#[derive(Debug, Clone, Default)]
pub struct StorageSettings {
    /// AWS region.
    pub region: Option<String>,
    /// Custom endpoint (for S3-compatible services).
    pub endpoint: Option<String>,
    /// Static access key. Only used together with `secret_key`.
    pub access_key: Option<String>,
    /// Static secret key. Only used together with `access_key`.
    pub secret_key: Option<String>,
}

impl StorageSettings {
    /// The static credential pair, if both parts are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.access_key.as_deref(), self.secret_key.as_deref()) {
            (Some(access), Some(secret)) => Some((access, secret)),
            _ => None,
        }
    }
}

/// Settings for an ingest run.
#[derive(Debug, Clone)]
pub struct IngestSettings {
    /// Target search index.
    pub index_name: String,
    /// Bucket processed files are moved to. No move when unset.
    pub processed_bucket: Option<String>,
    /// CSV parsing options.
    pub csv: CsvOptions,
    /// Object storage connection.
    pub storage: StorageSettings,
}

impl IngestSettings {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `INDEX_NAME`: Target index (default: "records")
    /// - `PROCESSED_BUCKET`: Archive bucket for processed files (optional)
    /// - `CSV_FIELD_LIMIT`: Maximum top-level columns per document (default: 1000)
    /// - `CSV_OVERFLOW_STRATEGY`: "collapse" or "prune" (default: collapse)
    /// - `AWS_REGION`, `S3_ENDPOINT`, `S3_ACCESS_KEY`, `S3_SECRET_KEY`: Object storage
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through a variable lookup function.
    ///
    /// Empty values count as unset. Invalid numbers and strategies fall back
    /// to their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let field_limit = match get("CSV_FIELD_LIMIT") {
            Some(raw) => raw.trim().parse::<usize>().unwrap_or_else(|_| {
                warn!(value = %raw, default = DEFAULT_FIELD_LIMIT, "Invalid CSV_FIELD_LIMIT, using default");
                DEFAULT_FIELD_LIMIT
            }),
            None => DEFAULT_FIELD_LIMIT,
        };

        let overflow_strategy = match get("CSV_OVERFLOW_STRATEGY") {
            Some(raw) => raw.parse::<OverflowStrategy>().unwrap_or_else(|e| {
                warn!(error = %e, "Invalid CSV_OVERFLOW_STRATEGY, defaulting to 'collapse'");
                OverflowStrategy::Collapse
            }),
            None => OverflowStrategy::default(),
        };

        Self {
            index_name: get("INDEX_NAME").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            processed_bucket: get("PROCESSED_BUCKET"),
            csv: CsvOptions {
                field_limit,
                overflow_strategy,
            },
            storage: StorageSettings {
                region: get("AWS_REGION"),
                endpoint: get("S3_ENDPOINT"),
                access_key: get("S3_ACCESS_KEY"),
                secret_key: get("S3_SECRET_KEY"),
            },
        }
    }
}
