//! Route definitions for the DocuSend HTTP API.
//!
//! All routes are mounted under `/api`. Viewer routes live under `/s/{id}`,
//! owner routes under `/resources`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(share_routes())
        .merge(resource_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http().make_span_with(middleware::logging::http_span))
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Viewer endpoints: open a link, satisfy requirements, leave feedback, download
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/s/{id}", get(handlers::share::open))
        .route("/s/{id}/email", post(handlers::share::submit_email))
        .route("/s/{id}/password", post(handlers::share::submit_password))
        .route("/s/{id}/nda", post(handlers::share::accept_nda))
        .route("/s/{id}/feedback", post(handlers::share::submit_feedback))
        .route("/download", get(handlers::download::download))
}

/// Owner endpoints
fn resource_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/resources",
            get(handlers::resource::list_resources).post(handlers::resource::create_resource),
        )
        .route(
            "/resources/{id}",
            get(handlers::resource::get_resource)
                .put(handlers::resource::update_resource)
                .delete(handlers::resource::delete_resource),
        )
        .route(
            "/resources/{id}/analytics",
            get(handlers::analytics::resource_analytics),
        )
        .route(
            "/resources/{id}/feedback",
            get(handlers::analytics::resource_feedback),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
