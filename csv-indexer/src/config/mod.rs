//! Configuration and dependency initialization for the CSV indexer.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{IngestSettings, StorageSettings, DEFAULT_INDEX_NAME};

/// Load `.env.local` and then `.env` into the process environment.
///
/// Both files are optional. Variables already set are never overridden, so
/// `.env.local` takes precedence over `.env`.
pub fn load_env_files() {
    dotenv::from_filename(".env.local").ok();
    dotenv::dotenv().ok();
}
