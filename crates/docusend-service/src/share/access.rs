//! Share access flow: fetch, consult the verification store, evaluate the
//! gate, and on success mint a content URL and record the view.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use validator::ValidateEmail;

use docusend_auth::password::PasswordHasher;
use docusend_core::config::VerificationConfig;
use docusend_core::error::AppError;
use docusend_core::result::AppResult;
use docusend_core::traits::VerificationStore;
use docusend_database::Repositories;
use docusend_database::repositories::{FeedbackRepository, ResourceRepository, ViewEventRepository};
use docusend_entity::RequirementKind;
use docusend_entity::access::AccessDecision;
use docusend_entity::analytics::{DeviceKind, Feedback, NewFeedback, NewViewEvent, browser_family};
use docusend_entity::resource::ShareableResource;
use docusend_storage::StorageManager;

use super::view::ShareView;
use crate::context::ViewerContext;
use crate::gate::{VerifiedSet, ViewerState, evaluate};

/// Longest accepted feedback message, in characters.
pub const MAX_FEEDBACK_CHARS: usize = 2000;

/// NDA acceptance submitted by a viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NdaAcceptance {
    /// Must be `true`.
    pub accepted: bool,
    /// Name the viewer signed with.
    pub signer_name: Option<String>,
}

/// Viewer-facing access to shared links.
#[derive(Debug, Clone)]
pub struct AccessService {
    resources: Arc<dyn ResourceRepository>,
    views: Arc<dyn ViewEventRepository>,
    feedback: Arc<dyn FeedbackRepository>,
    storage: Arc<StorageManager>,
    hasher: Arc<PasswordHasher>,
    verification: VerificationConfig,
}

impl AccessService {
    /// Creates a new access service.
    pub fn new(
        repos: &Repositories,
        storage: Arc<StorageManager>,
        hasher: Arc<PasswordHasher>,
        verification: VerificationConfig,
    ) -> Self {
        Self {
            resources: repos.resources.clone(),
            views: repos.views.clone(),
            feedback: repos.feedback.clone(),
            storage,
            hasher,
            verification,
        }
    }

    /// Open a shared link.
    ///
    /// Every gate outcome is returned as data. Errors are reserved for
    /// infrastructure failures after the gate has granted access.
    pub async fn open(
        &self,
        resource_id: Uuid,
        viewer: &ViewerContext,
        store: &dyn VerificationStore,
    ) -> AppResult<ShareView> {
        let resource = self.fetch(resource_id).await;
        let decision = self.decide(resource.as_ref(), viewer, store).await;
        self.render(decision, resource.as_ref(), viewer).await
    }

    /// Satisfy the email requirement.
    pub async fn submit_email(
        &self,
        resource_id: Uuid,
        viewer: &ViewerContext,
        store: &dyn VerificationStore,
        email: &str,
    ) -> AppResult<ShareView> {
        let resource = self
            .prepare(resource_id, viewer, store, RequirementKind::Email)
            .await?;
        let email = email.trim();
        if !email.validate_email() {
            return Err(AppError::validation("A valid email address is required"));
        }
        self.record(&resource, store, RequirementKind::Email).await?;
        info!(%resource_id, "Email gate passed");

        let viewer = ViewerContext {
            email: Some(email.to_string()),
            ..viewer.clone()
        };
        self.reopen(&resource, &viewer, store).await
    }

    /// Satisfy the password requirement. A wrong password records nothing.
    pub async fn submit_password(
        &self,
        resource_id: Uuid,
        viewer: &ViewerContext,
        store: &dyn VerificationStore,
        password: &str,
    ) -> AppResult<ShareView> {
        let resource = self
            .prepare(resource_id, viewer, store, RequirementKind::Password)
            .await?;
        let hash = resource
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::internal("Password required but no hash stored"))?;
        if !self.hasher.verify_password(password, hash)? {
            warn!(%resource_id, "Wrong link password");
            return Err(AppError::authentication("Incorrect password"));
        }
        self.record(&resource, store, RequirementKind::Password)
            .await?;
        info!(%resource_id, "Password gate passed");
        self.reopen(&resource, viewer, store).await
    }

    /// Satisfy the NDA requirement.
    pub async fn accept_nda(
        &self,
        resource_id: Uuid,
        viewer: &ViewerContext,
        store: &dyn VerificationStore,
        acceptance: &NdaAcceptance,
    ) -> AppResult<ShareView> {
        let resource = self
            .prepare(resource_id, viewer, store, RequirementKind::Nda)
            .await?;
        if !acceptance.accepted {
            return Err(AppError::validation("The NDA must be accepted to continue"));
        }
        self.record(&resource, store, RequirementKind::Nda).await?;
        info!(
            %resource_id,
            signer = acceptance.signer_name.as_deref().unwrap_or(""),
            "NDA accepted"
        );
        self.reopen(&resource, viewer, store).await
    }

    /// Leave feedback on a resource the viewer currently has access to.
    pub async fn submit_feedback(
        &self,
        resource_id: Uuid,
        viewer: &ViewerContext,
        store: &dyn VerificationStore,
        message: &str,
    ) -> AppResult<Feedback> {
        let resource = self.fetch(resource_id).await;
        let decision = self.decide(resource.as_ref(), viewer, store).await;
        let resource = Self::reject_terminal(decision, resource)?;

        let message = message.trim();
        let chars = message.chars().count();
        if chars == 0 || chars > MAX_FEEDBACK_CHARS {
            return Err(AppError::validation(format!(
                "Feedback must be between 1 and {MAX_FEEDBACK_CHARS} characters"
            )));
        }
        if !resource.feedback_enabled {
            return Err(AppError::authorization(
                "Feedback is not enabled for this resource",
            ));
        }
        if !decision.is_granted() {
            return Err(AppError::authorization(
                "Complete the access steps before leaving feedback",
            ));
        }

        let feedback = self
            .feedback
            .create(&NewFeedback {
                resource_id,
                viewer_email: viewer.email.clone(),
                message: message.to_string(),
            })
            .await?;
        info!(%resource_id, feedback_id = %feedback.id, "Feedback received");
        Ok(feedback)
    }

    /// Load a resource, collapsing fetch failures into "absent".
    async fn fetch(&self, resource_id: Uuid) -> Option<ShareableResource> {
        match self.resources.find_by_id(resource_id).await {
            Ok(found) => found,
            Err(e) => {
                warn!(%resource_id, error = %e, "Resource fetch failed; answering not found");
                None
            }
        }
    }

    /// Read verification flags and run the gate. Store errors fail closed.
    async fn decide(
        &self,
        resource: Option<&ShareableResource>,
        viewer: &ViewerContext,
        store: &dyn VerificationStore,
    ) -> AccessDecision {
        let mut verified = VerifiedSet::empty();
        if let Some(resource) = resource {
            for kind in resource.requirements() {
                match store.has(resource.id, kind).await {
                    Ok(true) => verified.insert(kind),
                    Ok(false) => {}
                    Err(e) => {
                        warn!(resource_id = %resource.id, %kind, error = %e, "Verification lookup failed")
                    }
                }
            }
        }
        let state = ViewerState {
            authenticated: viewer.is_authenticated(),
            verified,
        };
        evaluate(resource, &state, viewer.request_time)
    }

    async fn render(
        &self,
        decision: AccessDecision,
        resource: Option<&ShareableResource>,
        viewer: &ViewerContext,
    ) -> AppResult<ShareView> {
        let signed = match (decision, resource) {
            (AccessDecision::Granted, Some(r)) => {
                let signed = self.storage.issue(&r.storage_path).await?;
                self.record_view(r, viewer).await;
                Some(signed)
            }
            _ => None,
        };
        Ok(ShareView::new(decision, resource, signed))
    }

    async fn reopen(
        &self,
        resource: &ShareableResource,
        viewer: &ViewerContext,
        store: &dyn VerificationStore,
    ) -> AppResult<ShareView> {
        let decision = self.decide(Some(resource), viewer, store).await;
        self.render(decision, Some(resource), viewer).await
    }

    /// Check a submission for `kind` is allowed right now and return the
    /// resource it targets.
    async fn prepare(
        &self,
        resource_id: Uuid,
        viewer: &ViewerContext,
        store: &dyn VerificationStore,
        kind: RequirementKind,
    ) -> AppResult<ShareableResource> {
        let resource = self.fetch(resource_id).await;
        let decision = self.decide(resource.as_ref(), viewer, store).await;
        let resource = Self::reject_terminal(decision, resource)?;

        if !resource.requires(kind) {
            return Err(AppError::validation(format!(
                "This link does not require {kind}"
            )));
        }
        if let Some(pending) = decision.required_kind() {
            if pending < kind {
                return Err(AppError::validation(format!(
                    "Complete the {pending} step first"
                )));
            }
        }
        Ok(resource)
    }

    /// Map decisions that end the flow onto errors.
    fn reject_terminal(
        decision: AccessDecision,
        resource: Option<ShareableResource>,
    ) -> AppResult<ShareableResource> {
        match (decision, resource) {
            (AccessDecision::NotFound, _) | (_, None) => {
                Err(AppError::not_found("Shared link not found"))
            }
            (AccessDecision::Unauthenticated, _) => {
                Err(AppError::authentication("Sign in to view this link"))
            }
            (AccessDecision::Expired, _) => Err(AppError::gone("This link has expired")),
            (_, Some(resource)) => Ok(resource),
        }
    }

    async fn record(
        &self,
        resource: &ShareableResource,
        store: &dyn VerificationStore,
        kind: RequirementKind,
    ) -> AppResult<()> {
        store
            .set(resource.id, kind, self.verification.ttl_for(kind))
            .await
    }

    /// Analytics are best effort; a failed insert never blocks the viewer.
    async fn record_view(&self, resource: &ShareableResource, viewer: &ViewerContext) {
        let event = NewViewEvent {
            resource_id: resource.id,
            viewer_email: viewer.email.clone(),
            device: DeviceKind::from_user_agent(viewer.user_agent.as_deref()),
            browser: browser_family(viewer.user_agent.as_deref()),
            country: viewer.country.clone(),
        };
        if let Err(e) = self.views.record(&event).await {
            warn!(resource_id = %resource.id, error = %e, "Failed to record view");
        }
    }
}
