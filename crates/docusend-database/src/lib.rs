//! # docusend-database
//!
//! Repository traits for DocuSend entities with two backends: PostgreSQL
//! (sqlx) for production and in-memory maps for tests and demo mode.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;

pub use connection::DatabasePool;
pub use provider::Repositories;
