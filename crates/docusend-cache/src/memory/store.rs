//! In-memory verification store using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::debug;
use uuid::Uuid;

use docusend_core::result::AppResult;
use docusend_core::traits::VerificationStore;
use docusend_core::types::{RequirementKind, VerificationTtl};

use crate::keys;

/// Upper bound on stored flags before moka starts evicting.
const DEFAULT_CAPACITY: u64 = 100_000;

/// Stored value: the lifetime the flag was written with.
#[derive(Debug, Clone, Copy)]
struct Record {
    ttl: Option<Duration>,
}

/// Expires each entry after the TTL it was inserted with.
struct PerEntryExpiry;

impl Expiry<String, Record> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Record,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Record,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// Verification flags held in process memory.
///
/// Clones share the same underlying cache. [`MemoryVerificationStore::scoped`]
/// returns a view for a different viewer over the same cache.
#[derive(Clone)]
pub struct MemoryVerificationStore {
    cache: Cache<String, Record>,
    scope: String,
}

impl std::fmt::Debug for MemoryVerificationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryVerificationStore")
            .field("scope", &self.scope)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl MemoryVerificationStore {
    /// Create a store for a single anonymous viewer.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a store holding at most `max_capacity` flags.
    pub fn with_capacity(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryExpiry)
            .build();
        Self {
            cache,
            scope: "default".to_string(),
        }
    }

    /// A view of the same cache for another viewer.
    pub fn scoped(&self, viewer: impl Into<String>) -> Self {
        Self {
            cache: self.cache.clone(),
            scope: viewer.into(),
        }
    }
}

impl Default for MemoryVerificationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationStore for MemoryVerificationStore {
    async fn has(&self, resource_id: Uuid, kind: RequirementKind) -> AppResult<bool> {
        let key = keys::verification(&self.scope, resource_id, kind);
        Ok(self.cache.get(&key).await.is_some())
    }

    async fn set(
        &self,
        resource_id: Uuid,
        kind: RequirementKind,
        ttl: VerificationTtl,
    ) -> AppResult<()> {
        let key = keys::verification(&self.scope, resource_id, kind);
        let ttl = ttl.as_duration();
        debug!(%resource_id, %kind, ttl_secs = ttl.map(|d| d.as_secs()), "Verification recorded");
        self.cache.insert(key, Record { ttl }).await;
        Ok(())
    }
}
