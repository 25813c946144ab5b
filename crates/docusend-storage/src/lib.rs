//! # docusend-storage
//!
//! Object storage adapters. The only operations DocuSend needs from
//! storage are minting time-limited read URLs for granted viewers and
//! deleting objects when their resource is removed.
//!
//! - **local**: filesystem objects served through an HMAC-signed download route
//! - **s3**: S3-compatible buckets with presigned GET URLs (`s3` feature)

pub mod manager;
pub mod providers;

pub use manager::StorageManager;
pub use providers::local::LocalStorageProvider;
