//! Cache key builders.

use uuid::Uuid;

use docusend_core::types::RequirementKind;

/// Prefix applied to all DocuSend cache keys.
const PREFIX: &str = "docusend";

/// Key for one viewer's verification of one requirement on one resource.
pub fn verification(scope: &str, resource_id: Uuid, kind: RequirementKind) -> String {
    format!("{PREFIX}:verify:{scope}:{resource_id}:{kind}")
}
