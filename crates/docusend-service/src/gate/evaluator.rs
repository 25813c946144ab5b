//! Single-pass evaluation of the rule table.

use chrono::{DateTime, Utc};
use tracing::trace;

use docusend_entity::access::AccessDecision;
use docusend_entity::resource::ShareableResource;

use super::rules::{RULES, RuleInput, VerifiedSet};

/// What the gate knows about the requester.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerState {
    /// Whether the requester is signed in.
    pub authenticated: bool,
    /// Requirements already satisfied for this resource.
    pub verified: VerifiedSet,
}

impl ViewerState {
    pub fn anonymous(verified: VerifiedSet) -> Self {
        Self {
            authenticated: false,
            verified,
        }
    }

    pub fn signed_in(verified: VerifiedSet) -> Self {
        Self {
            authenticated: true,
            verified,
        }
    }
}

/// Decide what the viewer sees next.
///
/// Pure and total: an absent resource is `NotFound`, otherwise the first
/// blocking rule in [`RULES`] wins, otherwise `Granted`.
pub fn evaluate(
    resource: Option<&ShareableResource>,
    viewer: &ViewerState,
    now: DateTime<Utc>,
) -> AccessDecision {
    let Some(resource) = resource else {
        return AccessDecision::NotFound;
    };
    let input = RuleInput {
        resource,
        authenticated: viewer.authenticated,
        verified: viewer.verified,
        now,
    };
    match RULES.iter().find(|rule| (rule.blocks)(&input)) {
        Some(rule) => {
            trace!(resource_id = %resource.id, rule = rule.name, "Gate blocked");
            rule.outcome
        }
        None => AccessDecision::Granted,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use uuid::Uuid;

    use docusend_entity::RequirementKind;
    use docusend_entity::resource::ResourceKind;

    use super::*;

    fn resource() -> ShareableResource {
        let now = Utc::now();
        ShareableResource {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "deck.pdf".into(),
            kind: ResourceKind::Document,
            storage_path: "o/deck.pdf".into(),
            is_public: true,
            is_expiring: false,
            expires_at: None,
            require_email: false,
            require_password: false,
            password_hash: None,
            require_nda: false,
            nda_text: None,
            allow_download: true,
            feedback_enabled: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn anonymous() -> ViewerState {
        ViewerState::anonymous(VerifiedSet::empty())
    }

    #[test]
    fn test_absent_resource_is_not_found() {
        let viewer = ViewerState::signed_in(RequirementKind::ALL.into_iter().collect());
        assert_eq!(evaluate(None, &viewer, Utc::now()), AccessDecision::NotFound);
    }

    #[test]
    fn test_public_without_requirements_is_granted() {
        assert_eq!(
            evaluate(Some(&resource()), &anonymous(), Utc::now()),
            AccessDecision::Granted
        );
    }

    #[test]
    fn test_private_requires_sign_in() {
        let mut r = resource();
        r.is_public = false;
        assert_eq!(
            evaluate(Some(&r), &anonymous(), Utc::now()),
            AccessDecision::Unauthenticated
        );
        let viewer = ViewerState::signed_in(VerifiedSet::empty());
        assert_eq!(evaluate(Some(&r), &viewer, Utc::now()), AccessDecision::Granted);
    }

    #[test]
    fn test_expired_one_second_ago() {
        let now = Utc::now();
        let mut r = resource();
        r.is_expiring = true;
        r.expires_at = Some(now - Duration::seconds(1));
        assert_eq!(evaluate(Some(&r), &anonymous(), now), AccessDecision::Expired);
    }

    #[test]
    fn test_password_then_granted() {
        let mut r = resource();
        r.require_password = true;
        r.password_hash = Some("$argon2id$stub".into());
        assert_eq!(
            evaluate(Some(&r), &anonymous(), Utc::now()),
            AccessDecision::RequiresPassword
        );
        let viewer = ViewerState::anonymous(VerifiedSet::empty().with(RequirementKind::Password));
        assert_eq!(evaluate(Some(&r), &viewer, Utc::now()), AccessDecision::Granted);
    }

    #[test]
    fn test_unauthenticated_beats_expired() {
        let now = Utc::now();
        let mut r = resource();
        r.is_public = false;
        r.is_expiring = true;
        r.expires_at = Some(now - Duration::days(1));
        assert_eq!(
            evaluate(Some(&r), &anonymous(), now),
            AccessDecision::Unauthenticated
        );
    }

    #[test]
    fn test_expired_beats_every_requirement() {
        let now = Utc::now();
        let mut r = resource();
        r.is_expiring = true;
        r.expires_at = Some(now);
        r.require_email = true;
        r.require_password = true;
        r.require_nda = true;
        for verified in all_verified_sets() {
            let viewer = ViewerState::anonymous(verified);
            assert_eq!(evaluate(Some(&r), &viewer, now), AccessDecision::Expired);
        }
    }

    #[test]
    fn test_expiration_ignored_when_flag_off() {
        let now = Utc::now();
        let mut r = resource();
        r.is_expiring = false;
        r.expires_at = Some(now - Duration::days(30));
        assert_eq!(evaluate(Some(&r), &anonymous(), now), AccessDecision::Granted);
    }

    fn all_verified_sets() -> Vec<VerifiedSet> {
        (0u8..8)
            .map(|bits| {
                RequirementKind::ALL
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| bits & (1 << i) != 0)
                    .map(|(_, k)| k)
                    .collect()
            })
            .collect()
    }

    /// All 64 combinations of enabled requirements and verification flags.
    #[test]
    fn test_exhaustive_requirement_matrix() {
        let now = Utc::now();
        for enabled in 0u8..8 {
            let mut r = resource();
            r.require_email = enabled & 0b001 != 0;
            r.require_password = enabled & 0b010 != 0;
            r.require_nda = enabled & 0b100 != 0;

            for verified in all_verified_sets() {
                let decision = evaluate(Some(&r), &ViewerState::anonymous(verified), now);
                let first_unmet = RequirementKind::ALL
                    .into_iter()
                    .find(|k| r.requires(*k) && !verified.contains(*k));

                match first_unmet {
                    Some(kind) => {
                        assert_eq!(decision, AccessDecision::requiring(kind), "{enabled:03b} {verified:?}");
                    }
                    None => assert_eq!(decision, AccessDecision::Granted),
                }
                if decision.is_granted() {
                    assert!(r.requirements().iter().all(|k| verified.contains(*k)));
                }
            }
        }
    }
}
