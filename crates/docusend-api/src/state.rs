//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use docusend_auth::{JwtDecoder, PasswordHasher};
use docusend_core::config::AppConfig;
use docusend_core::error::AppError;
use docusend_core::result::AppResult;
use docusend_database::Repositories;
use docusend_service::{AccessService, AnalyticsService, ResourceService};
use docusend_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Repository set (PostgreSQL or in-memory)
    pub repos: Repositories,
    /// Object storage
    pub storage: Arc<StorageManager>,
    /// Owner token validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Signing key for verification cookies
    pub cookie_key: Key,
    /// Viewer access flow
    pub access_service: Arc<AccessService>,
    /// Owner resource management
    pub resource_service: Arc<ResourceService>,
    /// Owner analytics
    pub analytics_service: Arc<AnalyticsService>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("repos", &self.repos)
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire services over the given repositories and storage.
    pub fn new(
        config: AppConfig,
        repos: Repositories,
        storage: StorageManager,
    ) -> AppResult<Self> {
        let cookie_key = derive_cookie_key(&config.verification.cookie_secret)?;
        let storage = Arc::new(storage);
        let hasher = Arc::new(PasswordHasher::new());

        let access_service = Arc::new(AccessService::new(
            &repos,
            Arc::clone(&storage),
            Arc::clone(&hasher),
            config.verification.clone(),
        ));
        let resource_service = Arc::new(ResourceService::new(
            &repos,
            Arc::clone(&storage),
            Arc::clone(&hasher),
        ));
        let analytics_service = Arc::new(AnalyticsService::new(&repos));

        Ok(Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            config: Arc::new(config),
            repos,
            storage,
            cookie_key,
            access_service,
            resource_service,
            analytics_service,
            started_at: Instant::now(),
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Stretch an arbitrary-length secret to the 64 bytes a cookie key needs.
fn derive_cookie_key(secret: &str) -> AppResult<Key> {
    if secret.is_empty() {
        return Err(AppError::configuration(
            "verification.cookie_secret must not be empty",
        ));
    }
    let digest = Sha512::digest(secret.as_bytes());
    Key::try_from(digest.as_slice())
        .map_err(|e| AppError::configuration(format!("Invalid cookie key: {e}")))
}
