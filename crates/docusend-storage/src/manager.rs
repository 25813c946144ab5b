//! Storage manager: picks the configured provider at startup.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use docusend_core::config::StorageConfig;
use docusend_core::error::AppError;
use docusend_core::result::AppResult;
use docusend_core::traits::storage::{ObjectStorage, SignedUrl};

use crate::providers::local::LocalStorageProvider;

/// Holds the active provider plus the default signed URL lifetime.
#[derive(Debug, Clone)]
pub struct StorageManager {
    provider: Arc<dyn ObjectStorage>,
    /// Present when objects live on local disk and are served by the API.
    local: Option<Arc<LocalStorageProvider>>,
    signed_url_ttl: Duration,
}

impl StorageManager {
    /// Build the provider named by `config.provider`.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let ttl = Duration::from_secs(config.signed_url_ttl_seconds);
        match config.provider.as_str() {
            "local" => {
                let local = Arc::new(LocalStorageProvider::new(&config.local).await?);
                info!(root = %config.local.root_path, "Using local object storage");
                Ok(Self {
                    provider: local.clone(),
                    local: Some(local),
                    signed_url_ttl: ttl,
                })
            }
            #[cfg(feature = "s3")]
            "s3" => {
                let s3 = crate::providers::s3::S3StorageProvider::new(&config.s3).await?;
                Ok(Self::from_provider(Arc::new(s3), ttl))
            }
            other => Err(AppError::configuration(format!(
                "Unsupported storage provider: {other}"
            ))),
        }
    }

    /// Wrap an already-built provider.
    pub fn from_provider(provider: Arc<dyn ObjectStorage>, signed_url_ttl: Duration) -> Self {
        Self {
            provider,
            local: None,
            signed_url_ttl,
        }
    }

    /// Wrap a local provider, keeping it reachable for the download route.
    pub fn from_local(local: LocalStorageProvider, signed_url_ttl: Duration) -> Self {
        let local = Arc::new(local);
        Self {
            provider: local.clone(),
            local: Some(local),
            signed_url_ttl,
        }
    }

    /// The active provider.
    pub fn provider(&self) -> Arc<dyn ObjectStorage> {
        self.provider.clone()
    }

    /// The local provider, if that is what is configured.
    pub fn local(&self) -> Option<&LocalStorageProvider> {
        self.local.as_deref()
    }

    /// Mint a viewer URL with the configured lifetime.
    pub async fn issue(&self, path: &str) -> AppResult<SignedUrl> {
        self.provider.signed_url(path, self.signed_url_ttl).await
    }

    /// Remove an object.
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        self.provider.delete(path).await
    }

    /// Provider health.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.provider.health_check().await
    }
}
