//! What the viewer surface renders for a shared link.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docusend_core::traits::storage::SignedUrl;
use docusend_entity::access::AccessDecision;
use docusend_entity::resource::{ResourceSummary, ShareableResource};

/// Result of opening a shared link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareView {
    /// The gate's decision.
    pub decision: AccessDecision,
    /// Present once the viewer is past visibility and expiration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceSummary>,
    /// Time-limited content URL, only when granted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// NDA text, only while the NDA is being asked for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nda_text: Option<String>,
}

impl ShareView {
    pub(crate) fn new(
        decision: AccessDecision,
        resource: Option<&ShareableResource>,
        signed: Option<SignedUrl>,
    ) -> Self {
        let reveal = decision.is_granted() || decision.required_kind().is_some();
        let nda_text = match (decision, resource) {
            (AccessDecision::RequiresNda, Some(r)) => r.nda_text.clone(),
            _ => None,
        };
        let (signed_url, expires_at) = match signed {
            Some(s) => (Some(s.url), Some(s.expires_at)),
            None => (None, None),
        };
        Self {
            decision,
            resource: resource.filter(|_| reveal).map(ShareableResource::summary),
            signed_url,
            expires_at,
            nda_text,
        }
    }
}
