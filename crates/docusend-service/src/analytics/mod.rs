//! View analytics and feedback for owners.

pub mod report;
pub mod service;

pub use report::{Bucket, DailyViews, ResourceAnalytics};
pub use service::AnalyticsService;
