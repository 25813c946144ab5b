//! moka-backed verification store.

pub mod store;

pub use store::MemoryVerificationStore;
