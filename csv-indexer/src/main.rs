//! CSV Indexer Lambda Entry Point
//!
//! Receives S3 "object created" notifications and indexes the uploaded CSV
//! files into OpenSearch.

use csv_indexer::config::load_env_files;
use csv_indexer::telemetry::init_tracing;
use csv_indexer::{Dependencies, IndexingError, S3Event};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::{json, Value};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    load_env_files();
    init_tracing("csv-indexer");

    info!("Starting CSV indexer");

    let deps = match Dependencies::new().await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e.into());
        }
    };
    let orchestrator = &deps.orchestrator;

    run(service_fn(|event: LambdaEvent<S3Event>| async move {
        let reports = orchestrator
            .handle_event(&event.payload)
            .await
            .map_err(IndexingError::from)?;
        Ok::<Value, Error>(json!({ "reports": reports }))
    }))
    .await
}
