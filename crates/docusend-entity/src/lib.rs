//! # docusend-entity
//!
//! Domain entity models for DocuSend. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities additionally derive `sqlx::FromRow`.

pub mod access;
pub mod analytics;
pub mod resource;

pub use docusend_core::types::{RequirementKind, VerificationTtl};
