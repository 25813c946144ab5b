//! # docusend-api
//!
//! Axum HTTP surface for DocuSend: the public viewer routes under
//! `/api/s/{id}`, the signed download route, and the owner routes under
//! `/api/resources`.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod verification;

pub use app::build_app;
pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
