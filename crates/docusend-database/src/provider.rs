//! Repository set selected from configuration.

use std::sync::Arc;

use tracing::info;

use docusend_core::config::DatabaseConfig;
use docusend_core::error::AppError;
use docusend_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryFeedbackRepository, MemoryResourceRepository, MemoryViewEventRepository};
use crate::migration::run_migrations;
use crate::repositories::{
    FeedbackRepository, PgFeedbackRepository, PgResourceRepository, PgViewEventRepository,
    ResourceRepository, ViewEventRepository,
};

/// Every repository the services need, behind trait objects.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// Resource metadata.
    pub resources: Arc<dyn ResourceRepository>,
    /// Granted-view log.
    pub views: Arc<dyn ViewEventRepository>,
    /// Viewer feedback.
    pub feedback: Arc<dyn FeedbackRepository>,
    /// Connection pool when running against PostgreSQL.
    pub pool: Option<DatabasePool>,
}

impl Repositories {
    /// Build the repositories for the configured provider.
    ///
    /// The `postgres` provider connects and applies pending migrations.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "postgres" => {
                let db = DatabasePool::connect(config).await?;
                run_migrations(&db).await?;
                info!("Using PostgreSQL repositories");
                Ok(Self::postgres(db))
            }
            "memory" => {
                info!("Using in-memory repositories; data is lost on restart");
                Ok(Self::in_memory())
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    /// Repositories backed by an existing PostgreSQL pool.
    pub fn postgres(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            resources: Arc::new(PgResourceRepository::new(pool.clone())),
            views: Arc::new(PgViewEventRepository::new(pool.clone())),
            feedback: Arc::new(PgFeedbackRepository::new(pool)),
            pool: Some(db),
        }
    }

    /// Fresh, empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            resources: Arc::new(MemoryResourceRepository::new()),
            views: Arc::new(MemoryViewEventRepository::new()),
            feedback: Arc::new(MemoryFeedbackRepository::new()),
            pool: None,
        }
    }

    /// Check that the backing store is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(db) => db.health_check().await,
            None => Ok(true),
        }
    }
}
