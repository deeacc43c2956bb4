//! In-memory event store
//!
//! Keeps pages and view events in process memory. Intended for tests and
//! local development; data is lost when the process exits.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::{EventStore, Page, ViewEvent};
use crate::analytics::DeviceType;
use crate::errors::{BioviewError, Result};

#[derive(Debug, Default)]
struct Inner {
    pages: HashMap<i64, Page>,
    /// owner_id -> page_id
    owners: HashMap<i64, i64>,
    events: Vec<ViewEvent>,
    next_page_id: i64,
    next_event_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryEventStore {
    inner: RwLock<Inner>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接追加一条事件（设备值不做校验），用于导入或测试历史数据
    pub fn push_raw_event(
        &self,
        page_id: i64,
        device_type: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> ViewEvent {
        let mut inner = self.inner.write();
        inner.next_event_id += 1;
        let event = ViewEvent {
            id: inner.next_event_id,
            page_id,
            device_type: device_type.into(),
            created_at,
        };
        inner.events.push(event.clone());
        event
    }

    pub fn event_count(&self) -> usize {
        self.inner.read().events.len()
    }

    pub fn events_for_page(&self, page_id: i64) -> Vec<ViewEvent> {
        self.inner
            .read()
            .events
            .iter()
            .filter(|e| e.page_id == page_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    fn backend_name(&self) -> &str {
        "memory"
    }

    async fn find_page_by_owner(&self, owner_id: i64) -> Result<Option<Page>> {
        let inner = self.inner.read();
        Ok(inner
            .owners
            .get(&owner_id)
            .and_then(|page_id| inner.pages.get(page_id))
            .cloned())
    }

    async fn create_page(&self, owner_id: i64) -> Result<Page> {
        let mut inner = self.inner.write();
        if let Some(page) = inner.owners.get(&owner_id).and_then(|id| inner.pages.get(id)) {
            return Ok(page.clone());
        }

        inner.next_page_id += 1;
        let page = Page {
            id: inner.next_page_id,
            owner_id,
            views: 0,
            updated_at: Utc::now(),
        };
        inner.owners.insert(owner_id, page.id);
        inner.pages.insert(page.id, page.clone());
        Ok(page)
    }

    async fn insert_view_event(
        &self,
        page_id: i64,
        device: DeviceType,
        timestamp: DateTime<Utc>,
    ) -> Result<ViewEvent> {
        if !self.inner.read().pages.contains_key(&page_id) {
            return Err(BioviewError::not_found(format!("Page {} not found", page_id)));
        }
        Ok(self.push_raw_event(page_id, device.as_str(), timestamp))
    }

    async fn find_most_recent_event(
        &self,
        page_id: i64,
        device: DeviceType,
        min_timestamp: DateTime<Utc>,
    ) -> Result<Option<ViewEvent>> {
        let inner = self.inner.read();
        Ok(inner
            .events
            .iter()
            .filter(|e| {
                e.page_id == page_id
                    && e.device_type == device.as_str()
                    && e.created_at >= min_timestamp
            })
            .max_by_key(|e| (e.created_at, e.id))
            .cloned())
    }

    async fn increment_page_view_counter(
        &self,
        page_id: i64,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        let mut inner = self.inner.write();
        let page = inner
            .pages
            .get_mut(&page_id)
            .ok_or_else(|| BioviewError::not_found(format!("Page {} not found", page_id)))?;
        page.views += 1;
        page.updated_at = timestamp;
        Ok(())
    }

    async fn find_events_in_range(
        &self,
        page_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ViewEvent>> {
        let inner = self.inner.read();
        let mut events: Vec<ViewEvent> = inner
            .events
            .iter()
            .filter(|e| e.page_id == page_id && e.created_at >= start && e.created_at <= end)
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.created_at, e.id));
        Ok(events)
    }

    async fn count_events_in_range(
        &self,
        page_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64> {
        let inner = self.inner.read();
        Ok(inner
            .events
            .iter()
            .filter(|e| e.page_id == page_id && e.created_at >= start && e.created_at <= end)
            .count() as u64)
    }
}
