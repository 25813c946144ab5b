//! Link expiration check.

use chrono::{DateTime, Utc};

/// Whether a link has expired at `now`.
///
/// The bound is closed: a link expiring at `t` is already expired at `t`.
/// Links without the expiration flag, or without a timestamp, never expire.
pub fn is_expired(enabled: bool, expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match expires_at {
        Some(at) if enabled => now >= at,
        _ => false,
    }
}
