//! View event repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use docusend_core::error::{AppError, ErrorKind};
use docusend_core::result::AppResult;
use docusend_entity::analytics::{NewViewEvent, ViewEvent};

/// Append-only log of granted views.
#[async_trait]
pub trait ViewEventRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Record a view.
    async fn record(&self, event: &NewViewEvent) -> AppResult<ViewEvent>;

    /// All views of a resource, oldest first.
    async fn find_by_resource(&self, resource_id: Uuid) -> AppResult<Vec<ViewEvent>>;

    /// Remove every view of a resource. Returns the number removed.
    async fn delete_by_resource(&self, resource_id: Uuid) -> AppResult<u64>;
}

/// PostgreSQL-backed view event repository.
#[derive(Debug, Clone)]
pub struct PgViewEventRepository {
    pool: PgPool,
}

impl PgViewEventRepository {
    /// Create a new view event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ViewEventRepository for PgViewEventRepository {
    async fn record(&self, event: &NewViewEvent) -> AppResult<ViewEvent> {
        sqlx::query_as::<_, ViewEvent>(
            "INSERT INTO view_events (id, resource_id, viewer_email, device, browser, country) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(event.resource_id)
        .bind(&event.viewer_email)
        .bind(event.device)
        .bind(&event.browser)
        .bind(&event.country)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record view", e))
    }

    async fn find_by_resource(&self, resource_id: Uuid) -> AppResult<Vec<ViewEvent>> {
        sqlx::query_as::<_, ViewEvent>(
            "SELECT * FROM view_events WHERE resource_id = $1 ORDER BY viewed_at ASC",
        )
        .bind(resource_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list views", e))
    }

    async fn delete_by_resource(&self, resource_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM view_events WHERE resource_id = $1")
            .bind(resource_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete views", e))?;
        Ok(result.rows_affected())
    }
}
