//! Application builder: wires repositories, storage and services into a router.

use axum::Router;
use tracing::info;

use docusend_core::config::AppConfig;
use docusend_core::result::AppResult;
use docusend_database::Repositories;
use docusend_storage::StorageManager;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(
    config: AppConfig,
    repos: Repositories,
    storage: StorageManager,
) -> AppResult<Router> {
    info!(
        storage = %config.storage.provider,
        secure_cookies = config.verification.secure_cookies,
        "Building application"
    );
    let state = AppState::new(config, repos, storage)?;
    Ok(build_router(state))
}
