//! Viewer-facing share access.

pub mod access;
pub mod view;

pub use access::{AccessService, NdaAcceptance};
pub use view::ShareView;
