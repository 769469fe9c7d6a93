//! S3 "object created" notification types.
//!
//! Only the parts of the notification the indexer reads are modelled; every
//! level is optional so that a malformed record is reported by
//! [`S3EventRecord::location`] with a clear message instead of failing
//! deserialization.

use serde::{Deserialize, Serialize};

use crate::errors::IngestError;

/// An S3 notification event: a list of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

/// A single notification record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3EventRecord {
    #[serde(default)]
    pub s3: Option<S3Entity>,
}

/// The S3 part of a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Entity {
    #[serde(default)]
    pub bucket: Option<S3Bucket>,
    #[serde(default)]
    pub object: Option<S3Object>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Bucket {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Object {
    #[serde(default)]
    pub key: Option<String>,
}

/// A bucket/key pair pointing at one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl S3Event {
    /// Build a single-record event, as S3 would send for one uploaded object.
    pub fn for_object(bucket: Option<String>, key: Option<String>) -> Self {
        Self {
            records: vec![S3EventRecord {
                s3: Some(S3Entity {
                    bucket: Some(S3Bucket { name: bucket }),
                    object: Some(S3Object { key }),
                }),
            }],
        }
    }
}

impl S3EventRecord {
    /// Extract the bucket and key of the record.
    ///
    /// # Returns
    ///
    /// * `Ok(ObjectLocation)` - If both bucket and key are present and non-empty
    /// * `Err(IngestError::ConfigError)` - Otherwise
    pub fn location(&self) -> Result<ObjectLocation, IngestError> {
        let s3 = self.s3.as_ref();
        let bucket = s3
            .and_then(|s| s.bucket.as_ref())
            .and_then(|b| b.name.as_deref())
            .filter(|b| !b.is_empty());
        let key = s3
            .and_then(|s| s.object.as_ref())
            .and_then(|o| o.key.as_deref())
            .filter(|k| !k.is_empty());

        match (bucket, key) {
            (Some(bucket), Some(key)) => Ok(ObjectLocation {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            _ => Err(IngestError::config(format!(
                "S3 bucket or key missing in event record. Got bucket={:?}, key={:?}. \
                 Ensure the event or RAW_BUCKET env var is set when testing locally.",
                bucket, key
            ))),
        }
    }
}
