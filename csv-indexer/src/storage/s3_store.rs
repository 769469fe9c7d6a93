//! AWS S3 object store.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::{error::DisplayErrorContext, primitives::ByteStream, Client};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::{debug, info};

use crate::config::StorageSettings;
use crate::errors::IngestError;
use crate::storage::ObjectStore;

/// Region handed to the SDK when only a custom endpoint is configured.
const FALLBACK_REGION: &str = "us-east-1";

/// Characters left as-is in a copy source: RFC 3986 unreserved plus `/`.
const COPY_SOURCE_KEEP: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Build the URL-encoded `x-amz-copy-source` value for an object.
fn copy_source(bucket: &str, key: &str) -> String {
    format!("{}/{}", bucket, utf8_percent_encode(key, COPY_SOURCE_KEEP))
}

/// Object store backed by S3 or an S3-compatible server (MinIO, LocalStack).
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Create a new S3 object store.
    ///
    /// Static credentials are used when both access and secret key are set;
    /// otherwise the default AWS credential chain applies. A custom endpoint
    /// switches to path-style addressing.
    pub async fn new(settings: &StorageSettings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        // S3-compatible servers ignore the region, but the SDK refuses to sign without one.
        let region = settings
            .region
            .clone()
            .or_else(|| settings.endpoint.as_ref().map(|_| FALLBACK_REGION.to_string()));
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }

        if let Some((access_key, secret_key)) = settings.credentials() {
            loader = loader.credentials_provider(Credentials::new(
                access_key,
                secret_key,
                None,
                None,
                "csv-indexer-static",
            ));
        }

        let aws_config = loader.load().await;
        let mut s3_config = aws_sdk_s3::config::Builder::from(&aws_config);

        if let Some(endpoint) = &settings.endpoint {
            s3_config = s3_config.endpoint_url(endpoint).force_path_style(true);
        }

        let client = Client::from_conf(s3_config.build());

        info!(
            endpoint = ?settings.endpoint,
            region = ?settings.region,
            static_credentials = settings.credentials().is_some(),
            "Initialized S3 object store"
        );

        Self { client }
    }
}

/// Describe a failed S3 call, pointing at the credential settings when the
/// SDK could not find any.
fn storage_error<E>(operation: &str, bucket: &str, key: &str, err: E) -> IngestError
where
    E: std::error::Error,
{
    let detail = DisplayErrorContext(err).to_string();
    if detail.to_lowercase().contains("credentials") {
        IngestError::storage(format!(
            "AWS credentials not found for S3 ({} s3://{}/{}). Set S3_ACCESS_KEY and S3_SECRET_KEY \
             (or configure AWS credentials), or export AWS_PROFILE / AWS_ACCESS_KEY_ID & \
             AWS_SECRET_ACCESS_KEY: {}",
            operation, bucket, key, detail
        ))
    } else {
        IngestError::storage(format!(
            "{} s3://{}/{} failed: {}",
            operation, bucket, key, detail
        ))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, IngestError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| storage_error("get_object", bucket, key, e))?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| storage_error("get_object", bucket, key, e))?;

        let body = bytes.into_bytes().to_vec();
        debug!(bucket = %bucket, key = %key, bytes = body.len(), "Fetched object from S3");
        Ok(body)
    }

    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), IngestError> {
        let size = body.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| storage_error("put_object", bucket, key, e))?;

        debug!(bucket = %bucket, key = %key, bytes = size, "Uploaded object to S3");
        Ok(())
    }

    async fn copy_object(
        &self,
        source_bucket: &str,
        key: &str,
        destination_bucket: &str,
    ) -> Result<(), IngestError> {
        self.client
            .copy_object()
            .copy_source(copy_source(source_bucket, key))
            .bucket(destination_bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| storage_error("copy_object", source_bucket, key, e))?;

        debug!(
            source_bucket = %source_bucket,
            destination_bucket = %destination_bucket,
            key = %key,
            "Copied object in S3"
        );
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), IngestError> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| storage_error("delete_object", bucket, key, e))?;

        debug!(bucket = %bucket, key = %key, "Deleted object from S3");
        Ok(())
    }
}
