//! Local harness: runs the indexer handler in-process for one object.
//!
//! ```text
//! RAW_BUCKET=raw-data cargo run --bin run-local -- covid_global.csv
//! ```

use clap::Parser;
use csv_indexer::config::load_env_files;
use csv_indexer::telemetry::init_tracing;
use csv_indexer::{Dependencies, IndexingError, S3Event};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "run-local")]
#[command(about = "Index one S3 object as if S3 had sent a notification for it")]
struct Args {
    /// Object key to index
    key: String,

    /// Source bucket
    #[arg(long, env = "RAW_BUCKET")]
    bucket: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_env_files();
    let args = Args::parse();
    init_tracing("csv-indexer-local");

    let deps = Dependencies::new().await?;
    let event = S3Event::for_object(args.bucket, Some(args.key));

    match deps.orchestrator.handle_event(&event).await {
        Ok(reports) => {
            info!(records = reports.len(), "Local run completed");
            println!("{}", serde_json::to_string_pretty(&reports)?);
            Ok(())
        }
        Err(e) => {
            let err = IndexingError::from(e);
            error!(error = %err, "Local run failed");
            Err(err.into())
        }
    }
}
