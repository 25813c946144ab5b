//! Shareable resource entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use docusend_core::types::RequirementKind;

/// Whether a resource is a rendered document or an opaque file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resource_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A document shown in the in-browser viewer.
    Document,
    /// A file offered for download.
    File,
}

/// A document or file an owner has uploaded and configured for sharing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShareableResource {
    /// Unique resource identifier (also the share link identifier).
    pub id: Uuid,
    /// Owning user.
    pub owner_id: Uuid,
    /// Display name.
    pub name: String,
    /// Document or file.
    pub kind: ResourceKind,
    /// Object path within the storage provider.
    pub storage_path: String,
    /// Public links need no signed-in viewer.
    pub is_public: bool,
    /// Whether `expires_at` is enforced.
    pub is_expiring: bool,
    /// When the link stops working.
    pub expires_at: Option<DateTime<Utc>>,
    /// Viewer must provide an email address.
    pub require_email: bool,
    /// Viewer must enter the link password.
    pub require_password: bool,
    /// Argon2id hash of the link password.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Viewer must accept the NDA.
    pub require_nda: bool,
    /// NDA text shown to the viewer.
    pub nda_text: Option<String>,
    /// Whether granted viewers may download the original.
    pub allow_download: bool,
    /// Whether viewers may leave feedback.
    pub feedback_enabled: bool,
    /// When the resource was registered.
    pub created_at: DateTime<Utc>,
    /// Last settings change.
    pub updated_at: DateTime<Utc>,
}

impl ShareableResource {
    /// Whether the given requirement is switched on for this resource.
    pub fn requires(&self, kind: RequirementKind) -> bool {
        match kind {
            RequirementKind::Email => self.require_email,
            RequirementKind::Password => self.require_password,
            RequirementKind::Nda => self.require_nda,
        }
    }

    /// Enabled requirements in gate order.
    pub fn requirements(&self) -> Vec<RequirementKind> {
        RequirementKind::ALL
            .into_iter()
            .filter(|k| self.requires(*k))
            .collect()
    }

    /// Whether `user_id` owns this resource.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// The subset of fields safe to show any viewer.
    pub fn summary(&self) -> ResourceSummary {
        ResourceSummary {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
            allow_download: self.allow_download,
            feedback_enabled: self.feedback_enabled,
        }
    }
}

/// Viewer-safe projection of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSummary {
    /// Resource identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Document or file.
    pub kind: ResourceKind,
    /// Whether downloads are allowed.
    pub allow_download: bool,
    /// Whether feedback is accepted.
    pub feedback_enabled: bool,
}

/// Data required to register a new resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResource {
    /// Owning user.
    pub owner_id: Uuid,
    /// Display name.
    pub name: String,
    /// Document or file.
    pub kind: ResourceKind,
    /// Object path within the storage provider.
    pub storage_path: String,
    /// Public flag.
    pub is_public: bool,
    /// Expiration flag.
    pub is_expiring: bool,
    /// Expiration timestamp.
    pub expires_at: Option<DateTime<Utc>>,
    /// Email requirement.
    pub require_email: bool,
    /// Password requirement.
    pub require_password: bool,
    /// Argon2id hash of the link password.
    pub password_hash: Option<String>,
    /// NDA requirement.
    pub require_nda: bool,
    /// NDA text.
    pub nda_text: Option<String>,
    /// Download permission.
    pub allow_download: bool,
    /// Feedback permission.
    pub feedback_enabled: bool,
}
