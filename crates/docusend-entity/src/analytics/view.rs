//! View events recorded each time a viewer is granted access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Coarse device class derived from the User-Agent header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "device_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    /// Desktop or laptop browser.
    Desktop,
    /// Phone.
    Mobile,
    /// Tablet.
    Tablet,
    /// Crawler or link-preview bot.
    Bot,
    /// No or unrecognised User-Agent.
    Unknown,
}

impl DeviceKind {
    /// Lowercase label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Bot => "bot",
            Self::Unknown => "unknown",
        }
    }

    /// Classify a User-Agent string.
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        let Some(ua) = user_agent.map(str::to_ascii_lowercase) else {
            return Self::Unknown;
        };
        if ua.trim().is_empty() {
            return Self::Unknown;
        }
        if ["bot", "crawler", "spider", "slurp", "preview"]
            .iter()
            .any(|m| ua.contains(m))
        {
            return Self::Bot;
        }
        if ua.contains("ipad") || ua.contains("tablet") {
            return Self::Tablet;
        }
        if ua.contains("android") && !ua.contains("mobile") {
            return Self::Tablet;
        }
        if ua.contains("mobi") || ua.contains("iphone") {
            return Self::Mobile;
        }
        Self::Desktop
    }
}

/// Browser family from a User-Agent string.
///
/// Order matters: Edge and Opera advertise Chrome, Chrome advertises Safari.
pub fn browser_family(user_agent: Option<&str>) -> String {
    let Some(ua) = user_agent else {
        return "unknown".to_string();
    };
    let family = if ua.contains("Edg/") {
        "edge"
    } else if ua.contains("OPR/") || ua.contains("Opera") {
        "opera"
    } else if ua.contains("Firefox/") {
        "firefox"
    } else if ua.contains("Chrome/") || ua.contains("CriOS/") {
        "chrome"
    } else if ua.contains("Safari/") {
        "safari"
    } else {
        "other"
    };
    family.to_string()
}

/// A recorded view of a shared resource.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ViewEvent {
    /// Event identifier.
    pub id: Uuid,
    /// Viewed resource.
    pub resource_id: Uuid,
    /// Email captured by the email gate, if any.
    pub viewer_email: Option<String>,
    /// Device class.
    pub device: DeviceKind,
    /// Browser family.
    pub browser: String,
    /// ISO-3166 alpha-2 country code, if known.
    pub country: Option<String>,
    /// When the view happened.
    pub viewed_at: DateTime<Utc>,
}

/// Data required to record a view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewViewEvent {
    /// Viewed resource.
    pub resource_id: Uuid,
    /// Email captured by the email gate, if any.
    pub viewer_email: Option<String>,
    /// Device class.
    pub device: DeviceKind,
    /// Browser family.
    pub browser: String,
    /// Country code, if known.
    pub country: Option<String>,
}
