//! # docusend-service
//!
//! Business logic for DocuSend. Services orchestrate repositories, the
//! verification store, object storage, and password hashing around the
//! pure access gate.
//!
//! - `gate`: ordered rule table and expiration check
//! - `share`: viewer-facing access flow and requirement submissions
//! - `resource`: owner CRUD over shareable resources
//! - `analytics`: view aggregation and feedback listing

pub mod analytics;
pub mod context;
pub mod gate;
pub mod resource;
pub mod share;

#[cfg(test)]
mod testing;

pub use analytics::AnalyticsService;
pub use context::{RequestContext, ViewerContext};
pub use resource::ResourceService;
pub use share::AccessService;
