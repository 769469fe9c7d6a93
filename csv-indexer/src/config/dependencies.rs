//! Dependency initialization and wiring for the CSV indexer.

use std::sync::Arc;
use tracing::info;

use crate::config::IngestSettings;
use crate::loader::SearchLoader;
use crate::orchestrator::Orchestrator;
use crate::processor::CsvProcessor;
use crate::storage::S3ObjectStore;
use crate::IndexingError;
use csv_indexer_repository::{OpenSearchClient, SearchClientConfig};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to handle events.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// See [`SearchClientConfig::from_env`] and [`IngestSettings::from_env`]
    /// for the variables read.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If the search engine settings are missing or invalid
    pub async fn new() -> Result<Self, IndexingError> {
        let search_config = SearchClientConfig::from_env()
            .map_err(|e| IndexingError::config(format!("Invalid search engine settings: {}", e)))?;
        let settings = IngestSettings::from_env();

        info!(
            opensearch_endpoint = %search_config.endpoint,
            index_name = %settings.index_name,
            processed_bucket = ?settings.processed_bucket,
            csv_field_limit = settings.csv.field_limit,
            csv_overflow_strategy = settings.csv.overflow_strategy.as_str(),
            "Initializing dependencies"
        );

        let client = OpenSearchClient::new(search_config).map_err(|e| {
            IndexingError::config(format!("Failed to create OpenSearch client: {}", e))
        })?;

        let store = S3ObjectStore::new(&settings.storage).await;
        let processor = CsvProcessor::with_options(settings.csv);
        let loader = SearchLoader::new(Arc::new(client), settings.index_name);

        let orchestrator = Orchestrator::new(
            Arc::new(store),
            processor,
            loader,
            settings.processed_bucket,
        );

        Ok(Self { orchestrator })
    }
}
