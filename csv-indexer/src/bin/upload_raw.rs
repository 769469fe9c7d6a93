//! Downloads a CSV file over HTTP and uploads it to the raw bucket.
//!
//! ```text
//! cargo run --bin upload-raw -- --bucket raw-data --key covid_global.csv \
//!     --url https://example.org/covid_global.csv --s3-endpoint http://localhost:9000
//! ```

use anyhow::Context;
use clap::Parser;
use csv_indexer::config::{load_env_files, StorageSettings};
use csv_indexer::storage::{ObjectStore, S3ObjectStore};
use csv_indexer::telemetry::init_tracing;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "upload-raw")]
#[command(about = "Download a CSV file and upload it to an S3 bucket")]
struct Args {
    /// Destination bucket
    #[arg(long, env = "RAW_BUCKET")]
    bucket: String,

    /// Destination object key
    #[arg(long)]
    key: String,

    /// URL of the CSV file to download
    #[arg(long)]
    url: String,

    /// AWS region
    #[arg(long, env = "AWS_REGION")]
    region: Option<String>,

    /// Custom S3 endpoint (MinIO, LocalStack)
    #[arg(long, env = "S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// Static S3 access key
    #[arg(long, env = "S3_ACCESS_KEY")]
    s3_access_key: Option<String>,

    /// Static S3 secret key
    #[arg(long, env = "S3_SECRET_KEY", hide_env_values = true)]
    s3_secret_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_env_files();
    let args = Args::parse();
    init_tracing("csv-indexer-upload");

    info!(url = %args.url, "Downloading CSV");
    let body = reqwest::get(&args.url)
        .await
        .with_context(|| format!("failed to fetch {}", args.url))?
        .error_for_status()
        .with_context(|| format!("failed to fetch {}", args.url))?
        .bytes()
        .await
        .context("failed to read response body")?;

    let settings = StorageSettings {
        region: args.region,
        endpoint: args.s3_endpoint,
        access_key: args.s3_access_key,
        secret_key: args.s3_secret_key,
    };
    let store = S3ObjectStore::new(&settings).await;

    let size = body.len();
    store.put_object(&args.bucket, &args.key, body.to_vec()).await?;

    info!(
        bucket = %args.bucket,
        key = %args.key,
        bytes = size,
        "Uploaded CSV"
    );
    Ok(())
}
