//! The single outcome of evaluating a shared link.

use serde::{Deserialize, Serialize};

use docusend_core::types::RequirementKind;

/// What a viewer sees next for a shared link.
///
/// Computed fresh on every request and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// The resource does not exist or could not be loaded.
    NotFound,
    /// The resource is private and the viewer is not signed in.
    Unauthenticated,
    /// The link has passed its expiration time.
    Expired,
    /// The viewer must provide an email address.
    RequiresEmail,
    /// The viewer must enter the link password.
    RequiresPassword,
    /// The viewer must accept the NDA.
    RequiresNda,
    /// The viewer may see the content.
    Granted,
}

impl AccessDecision {
    /// The decision that asks for `kind`.
    pub fn requiring(kind: RequirementKind) -> Self {
        match kind {
            RequirementKind::Email => Self::RequiresEmail,
            RequirementKind::Password => Self::RequiresPassword,
            RequirementKind::Nda => Self::RequiresNda,
        }
    }

    /// The requirement this decision asks for, if any.
    pub fn required_kind(&self) -> Option<RequirementKind> {
        match self {
            Self::RequiresEmail => Some(RequirementKind::Email),
            Self::RequiresPassword => Some(RequirementKind::Password),
            Self::RequiresNda => Some(RequirementKind::Nda),
            _ => None,
        }
    }

    /// Whether content may be served.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}
