//! Event module for the CSV indexer ingest.
//!
//! Defines the S3 notifications that trigger an ingest run.

mod s3_event;

pub use s3_event::{ObjectLocation, S3Bucket, S3Entity, S3Event, S3EventRecord, S3Object};
