//! Core value types shared across the DocuSend workspace.

pub mod requirement;

pub use requirement::{RequirementKind, VerificationTtl};
