//! Event store
//!
//! `EventStore` is the only shared mutable resource of the analytics core.
//! Implementations provide their own consistency, in particular an atomic
//! counter increment; callers never lock.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::analytics::DeviceType;
use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod memory;
pub mod models;

pub use backend::SeaOrmEventStore;
pub use memory::MemoryEventStore;
pub use models::{Page, StorageConfig, ViewEvent};

#[async_trait]
pub trait EventStore: Send + Sync {
    fn backend_name(&self) -> &str;

    async fn find_page_by_owner(&self, owner_id: i64) -> Result<Option<Page>>;

    /// 为用户创建主页；已存在时返回现有主页
    async fn create_page(&self, owner_id: i64) -> Result<Page>;

    async fn insert_view_event(
        &self,
        page_id: i64,
        device: DeviceType,
        timestamp: DateTime<Utc>,
    ) -> Result<ViewEvent>;

    /// 查找 `created_at >= min_timestamp` 的最近一条同设备事件
    async fn find_most_recent_event(
        &self,
        page_id: i64,
        device: DeviceType,
        min_timestamp: DateTime<Utc>,
    ) -> Result<Option<ViewEvent>>;

    /// 原子地将计数加一，并刷新 updated_at
    async fn increment_page_view_counter(&self, page_id: i64, timestamp: DateTime<Utc>)
    -> Result<()>;

    /// 闭区间 [start, end] 内的事件，按时间升序
    async fn find_events_in_range(
        &self,
        page_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ViewEvent>>;

    async fn count_events_in_range(
        &self,
        page_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64>;

    /// 存储连通性探测，供健康检查使用
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend_config(&self) -> StorageConfig {
        StorageConfig {
            storage_type: self.backend_name().to_string(),
        }
    }
}

pub struct StorageFactory;

impl StorageFactory {
    /// 根据 database_url 创建存储；`memory://` 使用进程内存储
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<dyn EventStore>> {
        let database_url = &config.database_url;

        if database_url.starts_with("memory://") {
            return Ok(Arc::new(MemoryEventStore::new()));
        }

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = SeaOrmEventStore::new(database_url, &backend_type, config).await?;
        Ok(Arc::new(storage))
    }
}
