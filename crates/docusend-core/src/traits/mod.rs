//! Collaborator traits defined in `docusend-core` and implemented by other crates.

pub mod storage;
pub mod verification;

pub use storage::{ObjectStorage, SignedUrl};
pub use verification::VerificationStore;
