//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use docusend_entity::resource::ResourceKind;
use docusend_service::resource::{CreateResourceRequest, UpdateResourceRequest};
use docusend_service::share::NdaAcceptance;

/// Email gate submission.
///
/// Only the size is bounded here; the access service checks the address
/// after it has resolved the link.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailSubmission {
    #[validate(length(max = 320))]
    pub email: String,
}

/// Password gate submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordSubmission {
    #[validate(length(max = 1024))]
    pub password: String,
}

/// NDA gate submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NdaSubmission {
    pub accepted: bool,
    #[validate(length(max = 200))]
    pub signer_name: Option<String>,
}

impl From<NdaSubmission> for NdaAcceptance {
    fn from(s: NdaSubmission) -> Self {
        Self {
            accepted: s.accepted,
            signer_name: s.signer_name,
        }
    }
}

/// Viewer feedback.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackSubmission {
    #[validate(length(max = 8000))]
    pub message: String,
}

/// Query string of a signed download URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadQuery {
    pub path: String,
    pub expires: i64,
    pub sig: String,
}

/// Register a resource.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateResourceBody {
    /// Display name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Document or file.
    pub kind: ResourceKind,
    /// Object path of the uploaded content.
    #[validate(length(min = 1, max = 1024))]
    pub storage_path: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub is_expiring: bool,
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub require_email: bool,
    #[serde(default)]
    pub require_password: bool,
    #[validate(length(min = 1, max = 128))]
    pub password: Option<String>,
    #[serde(default)]
    pub require_nda: bool,
    #[validate(length(max = 20000))]
    pub nda_text: Option<String>,
    #[serde(default)]
    pub allow_download: bool,
    #[serde(default)]
    pub feedback_enabled: bool,
}

impl From<CreateResourceBody> for CreateResourceRequest {
    fn from(b: CreateResourceBody) -> Self {
        Self {
            name: b.name,
            kind: b.kind,
            storage_path: b.storage_path,
            is_public: b.is_public,
            is_expiring: b.is_expiring,
            expires_at: b.expires_at,
            require_email: b.require_email,
            require_password: b.require_password,
            password: b.password,
            require_nda: b.require_nda,
            nda_text: b.nda_text,
            allow_download: b.allow_download,
            feedback_enabled: b.feedback_enabled,
        }
    }
}

/// Change resource settings. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateResourceBody {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub is_public: Option<bool>,
    pub is_expiring: Option<bool>,
    pub expires_at: Option<DateTime<Utc>>,
    pub require_email: Option<bool>,
    pub require_password: Option<bool>,
    #[validate(length(min = 1, max = 128))]
    pub password: Option<String>,
    pub require_nda: Option<bool>,
    #[validate(length(max = 20000))]
    pub nda_text: Option<String>,
    pub allow_download: Option<bool>,
    pub feedback_enabled: Option<bool>,
}

impl From<UpdateResourceBody> for UpdateResourceRequest {
    fn from(b: UpdateResourceBody) -> Self {
        Self {
            name: b.name,
            is_public: b.is_public,
            is_expiring: b.is_expiring,
            expires_at: b.expires_at,
            require_email: b.require_email,
            require_password: b.require_password,
            password: b.password,
            require_nda: b.require_nda,
            nda_text: b.nda_text,
            allow_download: b.allow_download,
            feedback_enabled: b.feedback_enabled,
        }
    }
}
