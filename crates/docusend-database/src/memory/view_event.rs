//! In-memory view event repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use docusend_core::result::AppResult;
use docusend_entity::analytics::{NewViewEvent, ViewEvent};

use crate::repositories::ViewEventRepository;

/// View events grouped by resource.
#[derive(Debug, Clone, Default)]
pub struct MemoryViewEventRepository {
    events: Arc<DashMap<Uuid, Vec<ViewEvent>>>,
}

impl MemoryViewEventRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pre-built event (lets tests control `viewed_at`).
    pub fn insert(&self, event: ViewEvent) {
        self.events.entry(event.resource_id).or_default().push(event);
    }
}

#[async_trait]
impl ViewEventRepository for MemoryViewEventRepository {
    async fn record(&self, event: &NewViewEvent) -> AppResult<ViewEvent> {
        let stored = ViewEvent {
            id: Uuid::now_v7(),
            resource_id: event.resource_id,
            viewer_email: event.viewer_email.clone(),
            device: event.device,
            browser: event.browser.clone(),
            country: event.country.clone(),
            viewed_at: Utc::now(),
        };
        self.insert(stored.clone());
        Ok(stored)
    }

    async fn find_by_resource(&self, resource_id: Uuid) -> AppResult<Vec<ViewEvent>> {
        let mut events = self
            .events
            .get(&resource_id)
            .map(|e| e.value().clone())
            .unwrap_or_default();
        events.sort_by_key(|e| e.viewed_at);
        Ok(events)
    }

    async fn delete_by_resource(&self, resource_id: Uuid) -> AppResult<u64> {
        Ok(self
            .events
            .remove(&resource_id)
            .map(|(_, v)| v.len() as u64)
            .unwrap_or(0))
    }
}
