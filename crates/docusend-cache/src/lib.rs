//! # docusend-cache
//!
//! In-process verification store built on
//! [moka](https://crates.io/crates/moka) with per-entry expiry. Backs the
//! access gate in tests and single-node tooling; browsers use the signed
//! cookie store in `docusend-api` instead.

pub mod keys;
pub mod memory;

pub use memory::MemoryVerificationStore;
