//! S3 client implementation.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};

/// Artifact storage addressed by bucket and key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download an object into memory.
    async fn download_bytes(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>>;

    /// Download an object to a local file, creating parent directories.
    async fn download_file(&self, bucket: &str, key: &str, path: &Path) -> StorageResult<()>;

    /// Upload a local file.
    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Upload an in-memory payload.
    async fn upload_bytes(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Time-limited GET link for an object.
    async fn presign_get(&self, bucket: &str, key: &str, expires_in: Duration)
        -> StorageResult<String>;
}

/// Amazon S3 storage client.
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
}

impl S3Storage {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from shared AWS SDK configuration.
    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

fn map_get_error(err: SdkError<GetObjectError>, bucket: &str, key: &str) -> StorageError {
    let no_such_key = err
        .as_service_error()
        .map(|e| e.is_no_such_key())
        .unwrap_or(false);
    let http_404 = err
        .raw_response()
        .map(|r| r.status().as_u16() == 404)
        .unwrap_or(false);

    if no_such_key || http_404 {
        StorageError::not_found(bucket, key)
    } else {
        StorageError::download_failed(format!("s3://{}/{}: {}", bucket, key, err))
    }
}

#[async_trait]
impl ObjectStore for S3Storage {
    async fn download_bytes(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        debug!("Downloading s3://{}/{}", bucket, key);

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_get_error(e, bucket, key))?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::download_failed(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(bytes)
    }

    async fn download_file(&self, bucket: &str, key: &str, path: &Path) -> StorageResult<()> {
        let bytes = self.download_bytes(bucket, key).await?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, bytes).await?;

        info!("Downloaded s3://{}/{} to {}", bucket, key, path.display());
        Ok(())
    }

    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> StorageResult<()> {
        debug!("Uploading {} to s3://{}/{}", path.display(), bucket, key);

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(format!("s3://{}/{}: {}", bucket, key, e)))?;

        info!("Uploaded {} to s3://{}/{}", path.display(), bucket, key);
        Ok(())
    }

    async fn upload_bytes(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        debug!("Uploading {} bytes to s3://{}/{}", data.len(), bucket, key);

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(format!("s3://{}/{}: {}", bucket, key, e)))?;

        Ok(())
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let presign_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::PresignFailed(e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presign_config)
            .await
            .map_err(|e| StorageError::PresignFailed(e.to_string()))?;

        Ok(presigned.uri().to_string())
    }
}
