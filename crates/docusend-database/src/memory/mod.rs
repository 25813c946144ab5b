//! In-memory repository implementations backed by `dashmap`.
//!
//! Used by tests and by the `memory` database provider. Data does not
//! survive a restart.

mod feedback;
mod resource;
mod view_event;

pub use feedback::MemoryFeedbackRepository;
pub use resource::MemoryResourceRepository;
pub use view_event::MemoryViewEventRepository;
