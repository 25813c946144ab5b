//! Local filesystem storage provider with HMAC-signed download URLs.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tokio::fs;
use tracing::debug;

use docusend_core::config::storage::LocalStorageConfig;
use docusend_core::error::{AppError, ErrorKind};
use docusend_core::result::AppResult;
use docusend_core::traits::storage::{ObjectStorage, SignedUrl};

type HmacSha256 = Hmac<Sha256>;

/// Route the signed URLs point at.
pub const DOWNLOAD_ROUTE: &str = "/api/download";

/// Local filesystem storage provider.
#[derive(Clone)]
pub struct LocalStorageProvider {
    /// Root directory for all stored objects.
    root: PathBuf,
    /// Keyed MAC for download URLs, cloned per signature.
    mac: HmacSha256,
    /// Base URL prepended to [`DOWNLOAD_ROUTE`].
    base_url: String,
}

impl std::fmt::Debug for LocalStorageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStorageProvider")
            .field("root", &self.root)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl LocalStorageProvider {
    /// Create a provider rooted at `config.root_path`, creating it if needed.
    pub async fn new(config: &LocalStorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        if config.signing_secret.is_empty() {
            return Err(AppError::configuration(
                "storage.local.signing_secret must not be empty",
            ));
        }
        let mac = HmacSha256::new_from_slice(config.signing_secret.as_bytes())
            .map_err(|e| AppError::configuration(format!("Invalid signing secret: {e}")))?;
        Ok(Self {
            root,
            mac,
            base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Map an object path onto the filesystem, refusing anything that
    /// would escape the root.
    pub fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let clean = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !clean || relative.as_os_str().is_empty() {
            return Err(AppError::validation(format!("Invalid object path: {path}")));
        }
        Ok(self.root.join(relative))
    }

    fn mac(&self, path: &str, expires: i64) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(path.as_bytes());
        mac.update(b"\n");
        mac.update(expires.to_string().as_bytes());
        mac
    }

    /// Hex signature over `(path, expires)`.
    pub fn sign(&self, path: &str, expires: i64) -> String {
        hex::encode(self.mac(path, expires).finalize().into_bytes())
    }

    /// Check a download request's signature and expiry.
    pub fn verify(&self, path: &str, expires: i64, signature: &str, now: DateTime<Utc>) -> AppResult<()> {
        let provided = hex::decode(signature)
            .map_err(|_| AppError::authentication("Malformed download signature"))?;
        self.mac(path, expires)
            .verify_slice(&provided)
            .map_err(|_| AppError::authentication("Invalid download signature"))?;
        if now.timestamp() >= expires {
            return Err(AppError::gone("Download link has expired"));
        }
        Ok(())
    }

    /// Open a stored object for streaming.
    pub async fn open(&self, path: &str) -> AppResult<fs::File> {
        let full = self.resolve(path)?;
        fs::File::open(&full).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AppError::not_found("Object not found"),
            _ => AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to open object: {path}"),
                e,
            ),
        })
    }
}

#[async_trait]
impl ObjectStorage for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn signed_url(&self, path: &str, ttl: Duration) -> AppResult<SignedUrl> {
        self.resolve(path)?;
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AppError::validation(format!("Signed URL TTL out of range: {e}")))?;
        let expires_at = Utc::now() + ttl;
        let expires = expires_at.timestamp();
        let url = format!(
            "{}{}?path={}&expires={}&sig={}",
            self.base_url,
            DOWNLOAD_ROUTE,
            urlencoding::encode(path),
            expires,
            self.sign(path, expires),
        );
        Ok(SignedUrl { url, expires_at })
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full = self.resolve(path)?;
        match fs::remove_file(&full).await {
            Ok(()) => {
                debug!(path, "Deleted object");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete object: {path}"),
                e,
            )),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root).await.map(|m| m.is_dir()).unwrap_or(false))
    }
}
