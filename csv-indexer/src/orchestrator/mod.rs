//! Orchestrator module for the CSV indexer ingest.
//!
//! Coordinates the object store, processor, and loader components for each
//! record of an S3 notification.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::errors::IngestError;
use crate::events::{ObjectLocation, S3Event, S3EventRecord};
use crate::loader::SearchLoader;
use crate::processor::CsvProcessor;
use crate::storage::ObjectStore;
use csv_indexer_shared::BulkResult;

/// Outcome of ingesting one object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestReport {
    pub bucket: String,
    pub key: String,
    /// Number of documents parsed from the object.
    pub documents: usize,
    pub result: BulkResult,
    /// Bucket the object was moved to, if it was archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_to: Option<String>,
}

/// Orchestrator that runs the fetch, parse, index, archive flow.
///
/// Records are handled one after another; the first failing record stops the
/// run and its error is returned.
pub struct Orchestrator {
    store: Arc<dyn ObjectStore>,
    processor: CsvProcessor,
    loader: SearchLoader,
    processed_bucket: Option<String>,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    ///
    /// When `processed_bucket` is set, successfully indexed objects are moved
    /// there under the same key.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        processor: CsvProcessor,
        loader: SearchLoader,
        processed_bucket: Option<String>,
    ) -> Self {
        Self {
            store,
            processor,
            loader,
            processed_bucket,
        }
    }

    /// Handle an S3 notification.
    #[instrument(skip(self, event), fields(records = event.records.len()))]
    pub async fn handle_event(&self, event: &S3Event) -> Result<Vec<IngestReport>, IngestError> {
        let mut reports = Vec::with_capacity(event.records.len());

        for record in &event.records {
            reports.push(self.handle_record(record).await?);
        }

        info!(
            records = reports.len(),
            documents = reports.iter().map(|r| r.documents).sum::<usize>(),
            "Handled S3 event"
        );
        Ok(reports)
    }

    async fn handle_record(&self, record: &S3EventRecord) -> Result<IngestReport, IngestError> {
        let location = record.location().map_err(|e| {
            error!(error = %e, "Invalid S3 event record");
            e
        })?;

        self.ingest(&location).await.map_err(|e| {
            error!(
                bucket = %location.bucket,
                key = %location.key,
                error = %e,
                "Failed to ingest object"
            );
            e
        })
    }

    async fn ingest(&self, location: &ObjectLocation) -> Result<IngestReport, IngestError> {
        let ObjectLocation { bucket, key } = location;
        info!(bucket = %bucket, key = %key, "Ingesting object");

        let content = self.store.get_object(bucket, key).await?;
        let documents = self.processor.process(&content)?;
        let count = documents.len();

        let result = self.loader.load(documents).await;

        let archived_to = match &self.processed_bucket {
            Some(processed) if result.error.is_none() => {
                self.archive(location, processed).await?;
                Some(processed.clone())
            }
            Some(_) => {
                warn!(
                    bucket = %bucket,
                    key = %key,
                    "Bulk index failed, leaving object in place"
                );
                None
            }
            None => None,
        };

        Ok(IngestReport {
            bucket: bucket.clone(),
            key: key.clone(),
            documents: count,
            result,
            archived_to,
        })
    }

    /// Move an object to the processed bucket: copy, then delete the source.
    async fn archive(
        &self,
        location: &ObjectLocation,
        processed_bucket: &str,
    ) -> Result<(), IngestError> {
        self.store
            .copy_object(&location.bucket, &location.key, processed_bucket)
            .await?;
        self.store
            .delete_object(&location.bucket, &location.key)
            .await?;

        info!(
            from = %location.bucket,
            to = %processed_bucket,
            key = %location.key,
            "Archived object"
        );
        Ok(())
    }
}
