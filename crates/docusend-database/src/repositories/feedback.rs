//! Feedback repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use docusend_core::error::{AppError, ErrorKind};
use docusend_core::result::AppResult;
use docusend_entity::analytics::{Feedback, NewFeedback};

/// Storage of viewer feedback.
#[async_trait]
pub trait FeedbackRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Store a feedback message.
    async fn create(&self, data: &NewFeedback) -> AppResult<Feedback>;

    /// Feedback for a resource, newest first.
    async fn find_by_resource(&self, resource_id: Uuid) -> AppResult<Vec<Feedback>>;

    /// Remove every feedback message for a resource.
    async fn delete_by_resource(&self, resource_id: Uuid) -> AppResult<u64>;
}

/// PostgreSQL-backed feedback repository.
#[derive(Debug, Clone)]
pub struct PgFeedbackRepository {
    pool: PgPool,
}

impl PgFeedbackRepository {
    /// Create a new feedback repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    async fn create(&self, data: &NewFeedback) -> AppResult<Feedback> {
        sqlx::query_as::<_, Feedback>(
            "INSERT INTO feedback (id, resource_id, viewer_email, message) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(data.resource_id)
        .bind(&data.viewer_email)
        .bind(&data.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store feedback", e))
    }

    async fn find_by_resource(&self, resource_id: Uuid) -> AppResult<Vec<Feedback>> {
        sqlx::query_as::<_, Feedback>(
            "SELECT * FROM feedback WHERE resource_id = $1 ORDER BY created_at DESC",
        )
        .bind(resource_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list feedback", e))
    }

    async fn delete_by_resource(&self, resource_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM feedback WHERE resource_id = $1")
            .bind(resource_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete feedback", e)
            })?;
        Ok(result.rows_affected())
    }
}
