//! S3 storage backend.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use crate::{StorageError, StorageProvider};

/// Stores objects in an S3 bucket.
///
/// Credentials and region come from the standard AWS environment
/// (env vars, profile, instance metadata).
pub struct S3Provider {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_url: String,
}

impl S3Provider {
    /// Build a provider from the ambient AWS configuration.
    pub async fn from_env(bucket: String, public_url: String) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket,
            public_url,
        }
    }
}

#[async_trait]
impl StorageProvider for S3Provider {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;

        tracing::debug!(key, bucket = %self.bucket, "Stored object in S3");
        Ok(format!("{}/{key}", self.public_url))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        // DeleteObject on a missing key succeeds, matching the local
        // backend's idempotent delete.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;
        Ok(())
    }
}
