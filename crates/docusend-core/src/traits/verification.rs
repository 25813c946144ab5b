//! Verification store: viewer-scoped evidence that a requirement was met.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;
use crate::types::{RequirementKind, VerificationTtl};

/// Key/value store of verification flags for one viewer.
///
/// Keys are `(resource_id, kind)` pairs. Any store with optional per-key
/// expiry satisfies the contract; an expired key reads as absent.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Whether the viewer has satisfied `kind` for `resource_id`.
    async fn has(&self, resource_id: Uuid, kind: RequirementKind) -> AppResult<bool>;

    /// Record that the viewer satisfied `kind` for `resource_id`.
    async fn set(
        &self,
        resource_id: Uuid,
        kind: RequirementKind,
        ttl: VerificationTtl,
    ) -> AppResult<()>;
}
