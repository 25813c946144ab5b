//! # docusend-core
//!
//! Core crate for DocuSend. Contains the collaborator traits (verification
//! store, signed URL issuer), configuration schemas, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other DocuSend crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
