//! Owner-facing resource management.

pub mod service;

pub use service::{CreateResourceRequest, ResourceService, UpdateResourceRequest};
