//! S3-compatible object storage provider (requires the `s3` feature).

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::presigning::PresigningConfig;
use chrono::Utc;
use tracing::{debug, info};

use docusend_core::config::storage::S3StorageConfig;
use docusend_core::error::{AppError, ErrorKind};
use docusend_core::result::AppResult;
use docusend_core::traits::storage::{ObjectStorage, SignedUrl};

/// S3-compatible storage provider issuing presigned GET URLs.
#[derive(Debug, Clone)]
pub struct S3StorageProvider {
    client: Client,
    bucket: String,
}

impl S3StorageProvider {
    /// Build a client from the ambient AWS credential chain.
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        if config.bucket.is_empty() {
            return Err(AppError::configuration("storage.s3.bucket must be set"));
        }
        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 storage provider"
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if !config.endpoint.is_empty() {
            loader = loader.endpoint_url(&config.endpoint);
        }
        let shared = loader.load().await;

        // Custom endpoints (MinIO and friends) expect path-style addressing.
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(!config.endpoint.is_empty())
            .build();

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        })
    }
}

#[async_trait]
impl ObjectStorage for S3StorageProvider {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn signed_url(&self, path: &str, ttl: Duration) -> AppResult<SignedUrl> {
        let presign = PresigningConfig::expires_in(ttl).map_err(|e| {
            AppError::with_source(ErrorKind::Validation, "Invalid presign lifetime", e)
        })?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .presigned(presign)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to presign object: {path}"),
                    e,
                )
            })?;

        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AppError::validation(format!("Signed URL TTL out of range: {e}")))?;
        Ok(SignedUrl {
            url: request.uri().to_string(),
            expires_at: Utc::now() + ttl,
        })
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete object: {path}"),
                    e,
                )
            })?;
        debug!(path, bucket = %self.bucket, "Deleted object");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok())
    }
}
