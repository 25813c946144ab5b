//! Aggregation of recorded views into an owner-facing report.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docusend_entity::analytics::ViewEvent;

/// Views on one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyViews {
    pub date: NaiveDate,
    pub views: u64,
}

/// Views sharing one dimension value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub views: u64,
}

/// Aggregated view statistics for one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAnalytics {
    pub resource_id: Uuid,
    pub total_views: u64,
    /// Distinct email addresses captured at the gate.
    pub unique_viewers: u64,
    /// Views where no email was known.
    pub anonymous_views: u64,
    pub first_viewed_at: Option<DateTime<Utc>>,
    pub last_viewed_at: Option<DateTime<Utc>>,
    /// Oldest day first.
    pub by_day: Vec<DailyViews>,
    /// Largest bucket first; ties by key.
    pub by_device: Vec<Bucket>,
    pub by_browser: Vec<Bucket>,
    pub by_country: Vec<Bucket>,
}

impl ResourceAnalytics {
    /// Build the report from raw events.
    pub fn from_events(resource_id: Uuid, events: &[ViewEvent]) -> Self {
        let mut days: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        let mut devices: BTreeMap<String, u64> = BTreeMap::new();
        let mut browsers: BTreeMap<String, u64> = BTreeMap::new();
        let mut countries: BTreeMap<String, u64> = BTreeMap::new();
        let mut emails: HashSet<String> = HashSet::new();
        let mut anonymous_views = 0;

        for event in events {
            *days.entry(event.viewed_at.date_naive()).or_default() += 1;
            *devices.entry(event.device.as_str().to_string()).or_default() += 1;
            *browsers.entry(event.browser.clone()).or_default() += 1;
            let country = event
                .country
                .as_deref()
                .map(str::to_ascii_uppercase)
                .unwrap_or_else(|| "unknown".to_string());
            *countries.entry(country).or_default() += 1;
            match &event.viewer_email {
                Some(email) => {
                    emails.insert(email.to_ascii_lowercase());
                }
                None => anonymous_views += 1,
            }
        }

        Self {
            resource_id,
            total_views: events.len() as u64,
            unique_viewers: emails.len() as u64,
            anonymous_views,
            first_viewed_at: events.iter().map(|e| e.viewed_at).min(),
            last_viewed_at: events.iter().map(|e| e.viewed_at).max(),
            by_day: days
                .into_iter()
                .map(|(date, views)| DailyViews { date, views })
                .collect(),
            by_device: ranked(devices),
            by_browser: ranked(browsers),
            by_country: ranked(countries),
        }
    }
}

fn ranked(counts: BTreeMap<String, u64>) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = counts
        .into_iter()
        .map(|(key, views)| Bucket { key, views })
        .collect();
    // BTreeMap order is by key, so a stable sort keeps ties alphabetical.
    buckets.sort_by(|a, b| b.views.cmp(&a.views));
    buckets
}
