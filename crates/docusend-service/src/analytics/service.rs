//! Owner-facing analytics and feedback listing.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use docusend_core::result::AppResult;
use docusend_database::Repositories;
use docusend_database::repositories::{FeedbackRepository, ResourceRepository, ViewEventRepository};
use docusend_entity::analytics::Feedback;

use super::report::ResourceAnalytics;
use crate::context::RequestContext;
use crate::resource::service::owned_resource;

/// Reads analytics for resources the caller owns.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    resources: Arc<dyn ResourceRepository>,
    views: Arc<dyn ViewEventRepository>,
    feedback: Arc<dyn FeedbackRepository>,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    pub fn new(repos: &Repositories) -> Self {
        Self {
            resources: repos.resources.clone(),
            views: repos.views.clone(),
            feedback: repos.feedback.clone(),
        }
    }

    /// Aggregated view report for one resource.
    pub async fn report(&self, ctx: &RequestContext, id: Uuid) -> AppResult<ResourceAnalytics> {
        owned_resource(self.resources.as_ref(), ctx, id).await?;
        let events = self.views.find_by_resource(id).await?;
        debug!(resource_id = %id, events = events.len(), "Aggregating views");
        Ok(ResourceAnalytics::from_events(id, &events))
    }

    /// Feedback left on one resource, newest first.
    pub async fn feedback(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Vec<Feedback>> {
        owned_resource(self.resources.as_ref(), ctx, id).await?;
        self.feedback.find_by_resource(id).await
    }
}

#[cfg(test)]
mod tests {
    use docusend_cache::MemoryVerificationStore;
    use docusend_core::error::ErrorKind;

    use super::*;
    use crate::context::ViewerContext;
    use crate::testing::Fixture;

    const ANDROID: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Mobile Safari/537.36";

    #[tokio::test]
    async fn test_report_counts_granted_views_only() {
        let fx = Fixture::new().await;
        let svc = AnalyticsService::new(&fx.repos);
        let owner = RequestContext::new(fx.owner, None);
        let open = fx.resource(|r| r.feedback_enabled = true).await;
        let store = MemoryVerificationStore::new();

        let phone = ViewerContext {
            user_agent: Some(ANDROID.into()),
            country: Some("br".into()),
            ..ViewerContext::anonymous()
        };
        fx.access.open(open.id, &phone, &store).await.unwrap();
        fx.access.open(open.id, &ViewerContext::anonymous(), &store).await.unwrap();
        fx.access
            .submit_feedback(open.id, &phone, &store, "Slide 3 typo")
            .await
            .unwrap();

        let report = svc.report(&owner, open.id).await.unwrap();
        assert_eq!(report.total_views, 2);
        assert!(report.by_device.iter().any(|b| b.key == "mobile" && b.views == 1));
        assert!(report.by_country.iter().any(|b| b.key == "BR"));

        let feedback = svc.feedback(&owner, open.id).await.unwrap();
        assert_eq!(feedback.len(), 1);
    }

    #[tokio::test]
    async fn test_report_requires_ownership() {
        let fx = Fixture::new().await;
        let svc = AnalyticsService::new(&fx.repos);
        let r = fx.resource(|_| {}).await;
        let stranger = RequestContext::new(Uuid::new_v4(), None);

        let err = svc.report(&stranger, r.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        let err = svc.feedback(&stranger, r.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
