//! S3 object-store sink.
//!
//! Objects are written to `s3://{bucket}/{prefix}{file_name}`. Call
//! [`S3Sink::ensure_bucket`] before uploading; it creates the bucket when
//! HEAD-bucket reports it missing.

use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};

use super::{DatasetSink, OutputFormat};
use crate::config::S3Config;
use crate::error::TelemetryError;

/// Region in which buckets are created without a location constraint.
const DEFAULT_REGION: &str = "us-east-1";

/// Uploads datasets to one S3 bucket under a key prefix.
#[derive(Debug, Clone)]
pub struct S3Sink {
    client: aws_sdk_s3::Client,
    bucket: String,
    prefix: String,
    region: String,
}

impl S3Sink {
    /// Builds a client from the default AWS credential chain, pinned to
    /// the configured region.
    pub async fn connect(config: &S3Config) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;
        Self::with_client(aws_sdk_s3::Client::new(&sdk_config), config)
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn with_client(client: aws_sdk_s3::Client, config: &S3Config) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            prefix: config.prefix.clone(),
            region: config.region.clone(),
        }
    }

    /// Object key for `file_name`.
    #[must_use]
    pub fn key(&self, file_name: &str) -> String {
        object_key(&self.prefix, file_name)
    }

    /// Makes sure the bucket exists, creating it on a 404.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::BucketUnavailable`] if HEAD-bucket fails
    /// with anything other than "not found", or if creation fails.
    pub async fn ensure_bucket(&self) -> Result<(), TelemetryError> {
        let err = match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => {
                tracing::info!(bucket = %self.bucket, "bucket already exists");
                return Ok(());
            }
            Err(err) => err,
        };

        let missing = err
            .as_service_error()
            .is_some_and(aws_sdk_s3::operation::head_bucket::HeadBucketError::is_not_found)
            || err.raw_response().is_some_and(|r| r.status().as_u16() == 404);
        if !missing {
            tracing::error!(bucket = %self.bucket, error = %DisplayErrorContext(&err), "error checking bucket");
            return Err(TelemetryError::BucketUnavailable(self.bucket.clone()));
        }

        let mut request = self.client.create_bucket().bucket(&self.bucket);
        if self.region != DEFAULT_REGION {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                    .build(),
            );
        }
        match request.send().await {
            Ok(_) => {
                tracing::info!(bucket = %self.bucket, region = %self.region, "created bucket");
                Ok(())
            }
            Err(err) => {
                tracing::error!(bucket = %self.bucket, error = %DisplayErrorContext(&err), "error creating bucket");
                Err(TelemetryError::BucketUnavailable(self.bucket.clone()))
            }
        }
    }
}

impl DatasetSink for S3Sink {
    fn location(&self, file_name: &str) -> String {
        format!("s3://{}/{}", self.bucket, self.key(file_name))
    }

    async fn put(
        &self,
        file_name: &str,
        format: OutputFormat,
        body: Vec<u8>,
    ) -> Result<(), TelemetryError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(self.key(file_name))
            .body(ByteStream::from(body))
            .content_type(format.content_type())
            .send()
            .await
            .map_err(|e| TelemetryError::ObjectStore(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}

/// Joins a key prefix and a file name. An empty prefix yields the bare
/// file name; a non-empty prefix is separated by exactly one `/`.
#[must_use]
pub fn object_key(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.trim_start_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else if prefix.ends_with('/') {
        format!("{prefix}{file_name}")
    } else {
        format!("{prefix}/{file_name}")
    }
}
