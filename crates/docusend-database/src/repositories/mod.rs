//! Repository traits and their PostgreSQL implementations.

pub mod feedback;
pub mod resource;
pub mod view_event;

pub use feedback::{FeedbackRepository, PgFeedbackRepository};
pub use resource::{PgResourceRepository, ResourceRepository};
pub use view_event::{PgViewEventRepository, ViewEventRepository};
