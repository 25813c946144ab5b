//! Custom Axum extractors.

pub mod auth;
pub mod validated;
pub mod viewer;

pub use auth::OwnerUser;
pub use validated::ValidatedJson;
pub use viewer::Viewer;
