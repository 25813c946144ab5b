//! Object storage trait: signed URL minting and object removal.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A time-limited URL to a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedUrl {
    /// The URL a viewer can fetch the object from.
    pub url: String,
    /// When the URL stops working.
    pub expires_at: DateTime<Utc>,
}

/// Trait for object storage backends.
///
/// Uploading is handled by the storage service itself; DocuSend only
/// mints read URLs for granted viewers and removes objects when their
/// owner deletes a resource.
#[async_trait]
pub trait ObjectStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Mint a URL for the object at `path` that is valid for `ttl`.
    async fn signed_url(&self, path: &str, ttl: Duration) -> AppResult<SignedUrl>;

    /// Delete the object at `path`. Deleting a missing object is not an error.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether the provider is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
