//! 页面浏览记录器
//!
//! 对每次访问做尽力而为的去重：同一页面、同一设备类型在去重窗口内
//! 只记录一条事件并只累加一次计数。查询与写入不在同一事务中，
//! 并发的重复请求可能同时通过检查，造成少量多计。
//!
//! 记录失败永远不会传播给调用方：页面渲染不能因为统计失败而失败。

use std::sync::Arc;

use chrono::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

use super::clock::{Clock, SystemClock};
use super::{DeviceType, ViewMetadata};
use crate::config::AnalyticsConfig;
use crate::errors::{BioviewError, Result};
use crate::storage::EventStore;

/// 一次记录尝试的结果
///
/// 仅供调用方观察，忽略它是安全的。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// 新的浏览，已写入事件并累加计数
    Recorded(DeviceType),
    /// 窗口内已有同设备类型的浏览
    Duplicate(DeviceType),
    /// 该用户没有页面
    PageMissing,
    /// 存储出错，已记录日志
    Failed,
}

impl RecordOutcome {
    pub fn is_counted(&self) -> bool {
        matches!(self, RecordOutcome::Recorded(_))
    }
}

#[derive(Clone)]
pub struct ViewRecorder {
    store: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
    window: Duration,
}

impl ViewRecorder {
    /// 配置越界时返回 `Validation` 错误
    pub fn new(store: Arc<dyn EventStore>, config: &AnalyticsConfig) -> Result<Self> {
        Ok(Self::with_clock(
            store,
            Arc::new(SystemClock),
            config.dedup_window()?,
        ))
    }

    pub fn with_clock(store: Arc<dyn EventStore>, clock: Arc<dyn Clock>, window: Duration) -> Self {
        Self {
            store,
            clock,
            window,
        }
    }

    /// 记录一次页面访问
    ///
    /// 不返回错误；存储故障只会记录日志并得到 `RecordOutcome::Failed`。
    pub async fn record_view(&self, owner_id: i64, metadata: &ViewMetadata) -> RecordOutcome {
        match self.try_record(owner_id, metadata).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Failed to track page view for owner {}: {}", owner_id, e);
                RecordOutcome::Failed
            }
        }
    }

    /// 在后台任务中记录，调用方无需等待
    pub fn spawn_record(&self, owner_id: i64, metadata: ViewMetadata) -> JoinHandle<RecordOutcome> {
        let recorder = self.clone();
        tokio::spawn(async move { recorder.record_view(owner_id, &metadata).await })
    }

    async fn try_record(&self, owner_id: i64, metadata: &ViewMetadata) -> Result<RecordOutcome> {
        let Some(page) = self.store.find_page_by_owner(owner_id).await? else {
            warn!("Page not found for owner {}, view not tracked", owner_id);
            return Ok(RecordOutcome::PageMissing);
        };

        let device = DeviceType::classify(metadata.user_agent.as_deref());
        let now = self.clock.now();
        let window_start = now.checked_sub_signed(self.window).ok_or_else(|| {
            BioviewError::validation(format!("Dedup window {} out of range", self.window))
        })?;

        if let Some(recent) = self
            .store
            .find_most_recent_event(page.id, device, window_start)
            .await?
        {
            trace!(
                "Duplicate {} view on page {} (last at {})",
                device, page.id, recent.created_at
            );
            return Ok(RecordOutcome::Duplicate(device));
        }

        self.store.insert_view_event(page.id, device, now).await?;
        self.store.increment_page_view_counter(page.id, now).await?;

        debug!(
            "Tracked {} view on page {} (referer={:?}, country={:?})",
            device, page.id, metadata.referer, metadata.country
        );
        Ok(RecordOutcome::Recorded(device))
    }
}
