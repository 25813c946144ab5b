//! Ordered rule table evaluated by the gate.

use chrono::{DateTime, Utc};

use docusend_entity::RequirementKind;
use docusend_entity::access::AccessDecision;
use docusend_entity::resource::ShareableResource;

use super::expiration::is_expired;

/// Requirements the viewer has already satisfied for one resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifiedSet {
    email: bool,
    password: bool,
    nda: bool,
}

impl VerifiedSet {
    /// Nothing verified.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether `kind` has been satisfied.
    pub fn contains(&self, kind: RequirementKind) -> bool {
        match kind {
            RequirementKind::Email => self.email,
            RequirementKind::Password => self.password,
            RequirementKind::Nda => self.nda,
        }
    }

    /// Mark `kind` as satisfied.
    pub fn insert(&mut self, kind: RequirementKind) {
        match kind {
            RequirementKind::Email => self.email = true,
            RequirementKind::Password => self.password = true,
            RequirementKind::Nda => self.nda = true,
        }
    }

    /// Builder form of [`VerifiedSet::insert`].
    pub fn with(mut self, kind: RequirementKind) -> Self {
        self.insert(kind);
        self
    }
}

impl FromIterator<RequirementKind> for VerifiedSet {
    fn from_iter<I: IntoIterator<Item = RequirementKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub resource: &'a ShareableResource,
    pub authenticated: bool,
    pub verified: VerifiedSet,
    pub now: DateTime<Utc>,
}

/// One row of the gate: when `blocks` holds, the gate answers `outcome`.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Short name used in logs.
    pub name: &'static str,
    pub blocks: fn(&RuleInput<'_>) -> bool,
    pub outcome: AccessDecision,
}

/// Gate rules in precedence order. The first rule that blocks wins.
pub const RULES: [Rule; 5] = [
    Rule {
        name: "visibility",
        blocks: private_and_anonymous,
        outcome: AccessDecision::Unauthenticated,
    },
    Rule {
        name: "expiration",
        blocks: expired,
        outcome: AccessDecision::Expired,
    },
    Rule {
        name: "email",
        blocks: email_unverified,
        outcome: AccessDecision::RequiresEmail,
    },
    Rule {
        name: "password",
        blocks: password_unverified,
        outcome: AccessDecision::RequiresPassword,
    },
    Rule {
        name: "nda",
        blocks: nda_unaccepted,
        outcome: AccessDecision::RequiresNda,
    },
];

fn private_and_anonymous(input: &RuleInput<'_>) -> bool {
    !input.resource.is_public && !input.authenticated
}

fn expired(input: &RuleInput<'_>) -> bool {
    is_expired(
        input.resource.is_expiring,
        input.resource.expires_at,
        input.now,
    )
}

fn unmet(input: &RuleInput<'_>, kind: RequirementKind) -> bool {
    input.resource.requires(kind) && !input.verified.contains(kind)
}

fn email_unverified(input: &RuleInput<'_>) -> bool {
    unmet(input, RequirementKind::Email)
}

fn password_unverified(input: &RuleInput<'_>) -> bool {
    unmet(input, RequirementKind::Password)
}

fn nda_unaccepted(input: &RuleInput<'_>) -> bool {
    unmet(input, RequirementKind::Nda)
}
