//! Shareable resource entities.

pub mod model;

pub use model::{CreateResource, ResourceKind, ResourceSummary, ShareableResource};
