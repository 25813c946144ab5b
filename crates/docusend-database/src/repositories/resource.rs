//! Shareable resource repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use docusend_core::error::{AppError, ErrorKind};
use docusend_core::result::AppResult;
use docusend_entity::resource::{CreateResource, ShareableResource};

/// Storage of resource metadata rows.
#[async_trait]
pub trait ResourceRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find a resource by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ShareableResource>>;

    /// List resources owned by a user, newest first.
    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<ShareableResource>>;

    /// Insert a new resource.
    async fn create(&self, data: &CreateResource) -> AppResult<ShareableResource>;

    /// Persist every mutable field of `resource` and bump `updated_at`.
    async fn update(&self, resource: &ShareableResource) -> AppResult<ShareableResource>;

    /// Delete a resource. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL-backed resource repository.
#[derive(Debug, Clone)]
pub struct PgResourceRepository {
    pool: PgPool,
}

impl PgResourceRepository {
    /// Create a new resource repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository for PgResourceRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ShareableResource>> {
        sqlx::query_as::<_, ShareableResource>("SELECT * FROM resources WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find resource", e))
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<ShareableResource>> {
        sqlx::query_as::<_, ShareableResource>(
            "SELECT * FROM resources WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list resources", e))
    }

    async fn create(&self, data: &CreateResource) -> AppResult<ShareableResource> {
        sqlx::query_as::<_, ShareableResource>(
            "INSERT INTO resources (id, owner_id, name, kind, storage_path, is_public, is_expiring, \
             expires_at, require_email, require_password, password_hash, require_nda, nda_text, \
             allow_download, feedback_enabled) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(data.owner_id)
        .bind(&data.name)
        .bind(data.kind)
        .bind(&data.storage_path)
        .bind(data.is_public)
        .bind(data.is_expiring)
        .bind(data.expires_at)
        .bind(data.require_email)
        .bind(data.require_password)
        .bind(&data.password_hash)
        .bind(data.require_nda)
        .bind(&data.nda_text)
        .bind(data.allow_download)
        .bind(data.feedback_enabled)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create resource", e))
    }

    async fn update(&self, resource: &ShareableResource) -> AppResult<ShareableResource> {
        sqlx::query_as::<_, ShareableResource>(
            "UPDATE resources SET name = $2, is_public = $3, is_expiring = $4, expires_at = $5, \
             require_email = $6, require_password = $7, password_hash = $8, require_nda = $9, \
             nda_text = $10, allow_download = $11, feedback_enabled = $12, updated_at = $13 \
             WHERE id = $1 RETURNING *",
        )
        .bind(resource.id)
        .bind(&resource.name)
        .bind(resource.is_public)
        .bind(resource.is_expiring)
        .bind(resource.expires_at)
        .bind(resource.require_email)
        .bind(resource.require_password)
        .bind(&resource.password_hash)
        .bind(resource.require_nda)
        .bind(&resource.nda_text)
        .bind(resource.allow_download)
        .bind(resource.feedback_enabled)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update resource", e))?
        .ok_or_else(|| AppError::not_found("Resource not found"))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete resource", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
