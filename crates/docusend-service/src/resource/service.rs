//! Owner CRUD over shareable resources.

use std::path::{Component, Path};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use docusend_auth::password::PasswordHasher;
use docusend_core::error::AppError;
use docusend_core::result::AppResult;
use docusend_database::Repositories;
use docusend_database::repositories::{FeedbackRepository, ResourceRepository, ViewEventRepository};
use docusend_entity::resource::{CreateResource, ResourceKind, ShareableResource};
use docusend_storage::StorageManager;

use crate::context::RequestContext;

/// Request to register a new resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResourceRequest {
    pub name: String,
    pub kind: ResourceKind,
    /// Object path of the already-uploaded content.
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
    /// Plaintext link password; only its hash is stored.
    pub password: Option<String>,
    #[serde(default)]
    pub require_nda: bool,
    pub nda_text: Option<String>,
    #[serde(default)]
    pub allow_download: bool,
    #[serde(default)]
    pub feedback_enabled: bool,
}

/// Partial settings update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateResourceRequest {
    pub name: Option<String>,
    pub is_public: Option<bool>,
    pub is_expiring: Option<bool>,
    pub expires_at: Option<DateTime<Utc>>,
    pub require_email: Option<bool>,
    pub require_password: Option<bool>,
    /// Replaces the link password.
    pub password: Option<String>,
    pub require_nda: Option<bool>,
    pub nda_text: Option<String>,
    pub allow_download: Option<bool>,
    pub feedback_enabled: Option<bool>,
}

/// Manages resource registration, settings, and deletion.
#[derive(Debug, Clone)]
pub struct ResourceService {
    resources: Arc<dyn ResourceRepository>,
    views: Arc<dyn ViewEventRepository>,
    feedback: Arc<dyn FeedbackRepository>,
    storage: Arc<StorageManager>,
    hasher: Arc<PasswordHasher>,
}

impl ResourceService {
    /// Creates a new resource service.
    pub fn new(
        repos: &Repositories,
        storage: Arc<StorageManager>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            resources: repos.resources.clone(),
            views: repos.views.clone(),
            feedback: repos.feedback.clone(),
            storage,
            hasher,
        }
    }

    /// Lists resources owned by the current user.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<ShareableResource>> {
        self.resources.find_by_owner(ctx.user_id).await
    }

    /// Gets one of the current user's resources.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> AppResult<ShareableResource> {
        owned_resource(self.resources.as_ref(), ctx, id).await
    }

    /// Registers a new resource.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateResourceRequest,
    ) -> AppResult<ShareableResource> {
        validate_storage_path(&req.storage_path)?;
        let password_hash = match non_blank(req.password.as_deref()) {
            Some(pw) => Some(self.hasher.hash_password(pw)?),
            None => None,
        };

        let data = CreateResource {
            owner_id: ctx.user_id,
            name: req.name.trim().to_string(),
            kind: req.kind,
            storage_path: req.storage_path,
            is_public: req.is_public,
            is_expiring: req.is_expiring,
            expires_at: req.expires_at,
            require_email: req.require_email,
            require_password: req.require_password,
            password_hash,
            require_nda: req.require_nda,
            nda_text: req.nda_text,
            allow_download: req.allow_download,
            feedback_enabled: req.feedback_enabled,
        };
        validate_settings(&Settings::from(&data))?;

        let resource = self.resources.create(&data).await?;
        info!(
            user_id = %ctx.user_id,
            resource_id = %resource.id,
            requirements = ?resource.requirements(),
            "Resource created"
        );
        Ok(resource)
    }

    /// Applies a settings update.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateResourceRequest,
    ) -> AppResult<ShareableResource> {
        let mut resource = owned_resource(self.resources.as_ref(), ctx, id).await?;

        if let Some(name) = req.name {
            resource.name = name.trim().to_string();
        }
        if let Some(v) = req.is_public {
            resource.is_public = v;
        }
        if let Some(v) = req.is_expiring {
            resource.is_expiring = v;
        }
        if req.expires_at.is_some() {
            resource.expires_at = req.expires_at;
        }
        if let Some(v) = req.require_email {
            resource.require_email = v;
        }
        if let Some(v) = req.require_password {
            resource.require_password = v;
        }
        if let Some(pw) = non_blank(req.password.as_deref()) {
            resource.password_hash = Some(self.hasher.hash_password(pw)?);
        }
        if let Some(v) = req.require_nda {
            resource.require_nda = v;
        }
        if req.nda_text.is_some() {
            resource.nda_text = req.nda_text;
        }
        if let Some(v) = req.allow_download {
            resource.allow_download = v;
        }
        if let Some(v) = req.feedback_enabled {
            resource.feedback_enabled = v;
        }
        validate_settings(&Settings::from(&resource))?;

        let updated = self.resources.update(&resource).await?;
        info!(user_id = %ctx.user_id, resource_id = %id, "Resource settings updated");
        Ok(updated)
    }

    /// Deletes a resource with its stored object, views, and feedback.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let resource = owned_resource(self.resources.as_ref(), ctx, id).await?;

        self.storage.delete(&resource.storage_path).await?;
        let views = self.views.delete_by_resource(id).await?;
        let feedback = self.feedback.delete_by_resource(id).await?;
        self.resources.delete(id).await?;

        info!(
            user_id = %ctx.user_id,
            resource_id = %id,
            views,
            feedback,
            "Resource deleted"
        );
        Ok(())
    }
}

/// Load a resource and check the caller owns it.
pub(crate) async fn owned_resource(
    repo: &dyn ResourceRepository,
    ctx: &RequestContext,
    id: Uuid,
) -> AppResult<ShareableResource> {
    let resource = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Resource not found"))?;
    if !resource.is_owned_by(ctx.user_id) {
        return Err(AppError::authorization(
            "You do not have access to this resource",
        ));
    }
    Ok(resource)
}

/// The fields whose combinations must stay consistent.
struct Settings<'a> {
    name: &'a str,
    is_expiring: bool,
    expires_at: Option<DateTime<Utc>>,
    require_password: bool,
    password_hash: Option<&'a str>,
    require_nda: bool,
    nda_text: Option<&'a str>,
}

impl<'a> From<&'a CreateResource> for Settings<'a> {
    fn from(d: &'a CreateResource) -> Self {
        Self {
            name: &d.name,
            is_expiring: d.is_expiring,
            expires_at: d.expires_at,
            require_password: d.require_password,
            password_hash: d.password_hash.as_deref(),
            require_nda: d.require_nda,
            nda_text: d.nda_text.as_deref(),
        }
    }
}

impl<'a> From<&'a ShareableResource> for Settings<'a> {
    fn from(r: &'a ShareableResource) -> Self {
        Self {
            name: &r.name,
            is_expiring: r.is_expiring,
            expires_at: r.expires_at,
            require_password: r.require_password,
            password_hash: r.password_hash.as_deref(),
            require_nda: r.require_nda,
            nda_text: r.nda_text.as_deref(),
        }
    }
}

fn validate_settings(s: &Settings<'_>) -> AppResult<()> {
    if s.name.is_empty() {
        return Err(AppError::validation("Name must not be empty"));
    }
    if s.is_expiring && s.expires_at.is_none() {
        return Err(AppError::validation(
            "expires_at is required when expiration is enabled",
        ));
    }
    if s.require_password && s.password_hash.is_none() {
        return Err(AppError::validation(
            "A password is required when password protection is enabled",
        ));
    }
    if s.require_nda && non_blank(s.nda_text).is_none() {
        return Err(AppError::validation(
            "NDA text is required when the NDA is enabled",
        ));
    }
    Ok(())
}

fn validate_storage_path(path: &str) -> AppResult<()> {
    let p = Path::new(path);
    let ok = !path.is_empty() && p.components().all(|c| matches!(c, Component::Normal(_)));
    if !ok {
        return Err(AppError::validation(format!("Invalid storage path: {path}")));
    }
    Ok(())
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
