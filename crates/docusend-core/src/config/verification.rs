//! Viewer verification configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{RequirementKind, VerificationTtl};

/// Per-requirement lifetimes and cookie signing for viewer verification.
///
/// Each `*_ttl_seconds` key takes a positive number of seconds or
/// `"forever"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Secret used to sign verification cookies.
    #[serde(default = "default_cookie_secret")]
    pub cookie_secret: String,
    /// Whether verification cookies carry the `Secure` attribute.
    #[serde(default)]
    pub secure_cookies: bool,
    /// Email verification lifetime.
    #[serde(default = "forever")]
    pub email_ttl_seconds: VerificationTtl,
    /// Password verification lifetime.
    #[serde(default = "forever")]
    pub password_ttl_seconds: VerificationTtl,
    /// NDA acceptance lifetime.
    #[serde(default = "default_nda_ttl")]
    pub nda_ttl_seconds: VerificationTtl,
}

impl VerificationConfig {
    /// Lifetime of a freshly written record for `kind`.
    pub fn ttl_for(&self, kind: RequirementKind) -> VerificationTtl {
        match kind {
            RequirementKind::Email => self.email_ttl_seconds,
            RequirementKind::Password => self.password_ttl_seconds,
            RequirementKind::Nda => self.nda_ttl_seconds,
        }
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            cookie_secret: default_cookie_secret(),
            secure_cookies: false,
            email_ttl_seconds: forever(),
            password_ttl_seconds: forever(),
            nda_ttl_seconds: default_nda_ttl(),
        }
    }
}

fn default_cookie_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn forever() -> VerificationTtl {
    VerificationTtl::Forever
}

fn default_nda_ttl() -> VerificationTtl {
    VerificationTtl::For(Duration::from_secs(600))
}
