//! Interactive requirements a shared link can impose on a viewer.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One of the interactive steps a viewer may have to complete.
///
/// The variant order is the order the access gate asks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    /// The viewer must provide an email address.
    Email,
    /// The viewer must enter the link password.
    Password,
    /// The viewer must accept the NDA.
    Nda,
}

impl RequirementKind {
    /// All requirement kinds in gate order.
    pub const ALL: [RequirementKind; 3] = [Self::Email, Self::Password, Self::Nda];

    /// Stable lowercase name used in keys and cookie names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::Nda => "nda",
        }
    }
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequirementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "password" => Ok(Self::Password),
            "nda" => Ok(Self::Nda),
            other => Err(format!("Unknown requirement kind: {other}")),
        }
    }
}

/// How long a verification record lives.
///
/// Written in configuration as a positive number of seconds or the string
/// `"forever"`. Zero and negative values are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTtl", into = "RawTtl")]
pub enum VerificationTtl {
    /// Never expires on its own.
    Forever,
    /// Expires after the given duration.
    For(Duration),
}

impl VerificationTtl {
    /// The duration, or `None` for [`VerificationTtl::Forever`].
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Forever => None,
            Self::For(d) => Some(*d),
        }
    }
}

const FOREVER: &str = "forever";

/// Wire form of [`VerificationTtl`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawTtl {
    Seconds(i64),
    Text(String),
}

impl TryFrom<RawTtl> for VerificationTtl {
    type Error = String;

    fn try_from(raw: RawTtl) -> Result<Self, Self::Error> {
        let seconds = match raw {
            RawTtl::Text(text) if text.trim().eq_ignore_ascii_case(FOREVER) => {
                return Ok(Self::Forever);
            }
            RawTtl::Text(text) => text.trim().parse::<i64>().map_err(|_| {
                format!("Invalid verification TTL '{text}': expected seconds or \"{FOREVER}\"")
            })?,
            RawTtl::Seconds(seconds) => seconds,
        };
        if seconds <= 0 {
            return Err(format!(
                "Invalid verification TTL {seconds}: must be positive or \"{FOREVER}\""
            ));
        }
        Ok(Self::For(Duration::from_secs(seconds as u64)))
    }
}

impl From<VerificationTtl> for RawTtl {
    fn from(ttl: VerificationTtl) -> Self {
        match ttl {
            VerificationTtl::Forever => Self::Text(FOREVER.to_string()),
            VerificationTtl::For(d) => Self::Seconds(d.as_secs() as i64),
        }
    }
}
