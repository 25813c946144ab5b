//! Embedded schema migrations.

use tracing::info;

use docusend_core::error::{AppError, ErrorKind};

use crate::connection::DatabasePool;

/// Apply every pending migration from the workspace `migrations/` directory.
pub async fn run_migrations(db: &DatabasePool) -> Result<(), AppError> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(count = migrator.iter().count(), "Applying database migrations");

    migrator.run(db.pool()).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database schema is up to date");
    Ok(())
}
