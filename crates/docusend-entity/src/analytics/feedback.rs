//! Viewer feedback left on a shared resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A feedback message from a viewer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Feedback {
    /// Feedback identifier.
    pub id: Uuid,
    /// Resource the feedback is about.
    pub resource_id: Uuid,
    /// Email captured by the email gate, if any.
    pub viewer_email: Option<String>,
    /// Message body.
    pub message: String,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

/// Data required to store feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedback {
    /// Resource the feedback is about.
    pub resource_id: Uuid,
    /// Email captured by the email gate, if any.
    pub viewer_email: Option<String>,
    /// Message body.
    pub message: String,
}
