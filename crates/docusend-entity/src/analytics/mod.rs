//! View analytics and viewer feedback entities.

pub mod feedback;
pub mod view;

pub use feedback::{Feedback, NewFeedback};
pub use view::{DeviceKind, NewViewEvent, ViewEvent, browser_family};
