//! In-memory feedback repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use docusend_core::result::AppResult;
use docusend_entity::analytics::{Feedback, NewFeedback};

use crate::repositories::FeedbackRepository;

/// Feedback grouped by resource.
#[derive(Debug, Clone, Default)]
pub struct MemoryFeedbackRepository {
    items: Arc<DashMap<Uuid, Vec<Feedback>>>,
}

impl MemoryFeedbackRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackRepository for MemoryFeedbackRepository {
    async fn create(&self, data: &NewFeedback) -> AppResult<Feedback> {
        let item = Feedback {
            id: Uuid::now_v7(),
            resource_id: data.resource_id,
            viewer_email: data.viewer_email.clone(),
            message: data.message.clone(),
            created_at: Utc::now(),
        };
        self.items
            .entry(data.resource_id)
            .or_default()
            .push(item.clone());
        Ok(item)
    }

    async fn find_by_resource(&self, resource_id: Uuid) -> AppResult<Vec<Feedback>> {
        let mut items = self
            .items
            .get(&resource_id)
            .map(|e| e.value().clone())
            .unwrap_or_default();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn delete_by_resource(&self, resource_id: Uuid) -> AppResult<u64> {
        Ok(self
            .items
            .remove(&resource_id)
            .map(|(_, v)| v.len() as u64)
            .unwrap_or(0))
    }
}
