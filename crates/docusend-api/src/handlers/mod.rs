//! Request handlers grouped by surface.

pub mod analytics;
pub mod download;
pub mod health;
pub mod resource;
pub mod share;
