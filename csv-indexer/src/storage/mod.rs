//! Object storage module for the CSV indexer ingest.
//!
//! Defines the `ObjectStore` interface used to fetch, upload, and archive
//! objects, and its S3 implementation.

mod s3_store;

use async_trait::async_trait;

use crate::errors::IngestError;

pub use s3_store::S3ObjectStore;

/// Abstracts the object storage backend (S3, MinIO, LocalStack, ...).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the full content of an object.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, IngestError>;

    /// Store an object, replacing any existing object under the same key.
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), IngestError>;

    /// Copy an object to another bucket under the same key.
    async fn copy_object(
        &self,
        source_bucket: &str,
        key: &str,
        destination_bucket: &str,
    ) -> Result<(), IngestError>;

    /// Delete an object.
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), IngestError>;
}
