//! In-memory resource repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use docusend_core::error::AppError;
use docusend_core::result::AppResult;
use docusend_entity::resource::{CreateResource, ShareableResource};

use crate::repositories::ResourceRepository;

/// Resource rows kept in a concurrent map.
#[derive(Debug, Clone, Default)]
pub struct MemoryResourceRepository {
    rows: Arc<DashMap<Uuid, ShareableResource>>,
}

impl MemoryResourceRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceRepository for MemoryResourceRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ShareableResource>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<ShareableResource>> {
        let mut rows: Vec<ShareableResource> = self
            .rows
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn create(&self, data: &CreateResource) -> AppResult<ShareableResource> {
        let now = Utc::now();
        let resource = ShareableResource {
            id: Uuid::now_v7(),
            owner_id: data.owner_id,
            name: data.name.clone(),
            kind: data.kind,
            storage_path: data.storage_path.clone(),
            is_public: data.is_public,
            is_expiring: data.is_expiring,
            expires_at: data.expires_at,
            require_email: data.require_email,
            require_password: data.require_password,
            password_hash: data.password_hash.clone(),
            require_nda: data.require_nda,
            nda_text: data.nda_text.clone(),
            allow_download: data.allow_download,
            feedback_enabled: data.feedback_enabled,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(resource.id, resource.clone());
        Ok(resource)
    }

    async fn update(&self, resource: &ShareableResource) -> AppResult<ShareableResource> {
        let mut row = self
            .rows
            .get_mut(&resource.id)
            .ok_or_else(|| AppError::not_found("Resource not found"))?;
        let mut updated = resource.clone();
        updated.owner_id = row.owner_id;
        updated.kind = row.kind;
        updated.storage_path = row.storage_path.clone();
        updated.created_at = row.created_at;
        updated.updated_at = Utc::now();
        *row = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.rows.remove(&id).is_some())
    }
}
