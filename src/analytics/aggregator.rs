//! 浏览数据汇总
//!
//! 读取最近 N 天（默认 7 天）的浏览事件，折叠成两组展示数据：
//! - 按星期几（Mon..Sun 固定顺序）统计的浏览数
//! - 按设备类型（Desktop / Mobile / Tablet 固定顺序）统计的浏览数
//!
//! 星期桶按事件发生的星期名称累计，与窗口起点无关。

use std::sync::Arc;

use chrono::{Datelike, Duration};
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use super::DeviceType;
use super::clock::{Clock, SystemClock};
use crate::config::AnalyticsConfig;
use crate::errors::{BioviewError, Result};
use crate::storage::{EventStore, ViewEvent};

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// 单日浏览数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayViews {
    pub day: String,
    pub views: u64,
}

/// 设备类型浏览数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceCount {
    pub device: String,
    pub count: u64,
}

/// 最近活动汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub profile_views: Vec<DayViews>,
    pub device_types: Vec<DeviceCount>,
    /// 区间内的事件总数（含无法识别设备类型的事件）
    pub total_views: u64,
}

/// 按星期几分桶，输出固定 Mon..Sun 顺序的 7 个桶
pub fn weekday_series(events: &[ViewEvent]) -> Vec<DayViews> {
    let mut buckets = [0u64; 7];
    for event in events {
        buckets[event.created_at.weekday().num_days_from_monday() as usize] += 1;
    }

    WEEKDAY_LABELS
        .iter()
        .zip(buckets)
        .map(|(day, views)| DayViews {
            day: day.to_string(),
            views,
        })
        .collect()
}

/// 按设备类型分桶，无法识别的设备值被忽略
pub fn device_distribution(events: &[ViewEvent]) -> Vec<DeviceCount> {
    let mut counts: Vec<DeviceCount> = DeviceType::iter()
        .map(|d| DeviceCount {
            device: d.label().to_string(),
            count: 0,
        })
        .collect();

    for event in events {
        if let Some(bucket) = counts
            .iter_mut()
            .find(|c| c.device.eq_ignore_ascii_case(&event.device_type))
        {
            bucket.count += 1;
        }
    }

    counts
}

#[derive(Clone)]
pub struct AnalyticsAggregator {
    store: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
    days: u32,
}

impl AnalyticsAggregator {
    /// 配置越界时返回 `Validation` 错误
    pub fn new(store: Arc<dyn EventStore>, config: &AnalyticsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_clock(
            store,
            Arc::new(SystemClock),
            config.summary_days,
        ))
    }

    pub fn with_clock(store: Arc<dyn EventStore>, clock: Arc<dyn Clock>, days: u32) -> Self {
        Self { store, clock, days }
    }

    /// 汇总页面最近的浏览活动
    ///
    /// 页面不存在时返回 `NotFound`，存储错误原样返回。
    pub async fn summarize_recent_activity(&self, owner_id: i64) -> Result<ActivitySummary> {
        let page = self
            .store
            .find_page_by_owner(owner_id)
            .await?
            .ok_or_else(|| BioviewError::not_found(format!("Page not found for owner {}", owner_id)))?;

        let end = self.clock.now();
        let start = Duration::try_days(i64::from(self.days))
            .and_then(|span| end.checked_sub_signed(span))
            .ok_or_else(|| {
                BioviewError::validation(format!("Summary span of {} days out of range", self.days))
            })?;
        info!(
            "Analytics: summarize page {} from {} to {}",
            page.id, start, end
        );

        let (events, total_views) = tokio::try_join!(
            self.store.find_events_in_range(page.id, start, end),
            self.store.count_events_in_range(page.id, start, end),
        )?;

        debug!(
            "Analytics: page {} has {} events in range",
            page.id,
            events.len()
        );

        Ok(ActivitySummary {
            profile_views: weekday_series(&events),
            device_types: device_distribution(&events),
            total_views,
        })
    }
}
