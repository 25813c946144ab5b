//! Request contexts for owners and viewers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for an authenticated owner request.
///
/// Extracted from the bearer token by the API layer and passed into every
/// owner-facing service method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's email, when the token carries it.
    pub email: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: Option<String>) -> Self {
        Self {
            user_id,
            email,
            request_time: Utc::now(),
        }
    }
}

/// Context for a (possibly anonymous) viewer of a shared link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerContext {
    /// Signed-in user, if any.
    pub user_id: Option<Uuid>,
    /// Email captured by the email gate or carried by the token.
    pub email: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// ISO country code supplied by the edge proxy.
    pub country: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl ViewerContext {
    /// An anonymous viewer at the current time.
    pub fn anonymous() -> Self {
        Self {
            request_time: Utc::now(),
            ..Self::default()
        }
    }

    /// A signed-in viewer at the current time.
    pub fn signed_in(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::anonymous()
        }
    }

    /// Whether the viewer is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}
