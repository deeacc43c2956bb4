//! Page-view analytics
//!
//! - `recorder`: best-effort deduplicated view recording
//! - `aggregator`: weekday and device rollups for the dashboard
//! - `device`: User-Agent classification
//! - `clock`: injectable time source

pub mod aggregator;
pub mod clock;
pub mod device;
pub mod recorder;

pub use aggregator::{ActivitySummary, AnalyticsAggregator, DayViews, DeviceCount};
pub use clock::{Clock, ManualClock, SystemClock};
pub use device::DeviceType;
pub use recorder::{RecordOutcome, ViewRecorder};

/// 访问请求附带的元数据，均为原样透传的文本
#[derive(Debug, Clone, Default)]
pub struct ViewMetadata {
    /// 用户代理 (User-Agent header)
    pub user_agent: Option<String>,
    /// 来源页面 (Referer header)
    pub referer: Option<String>,
    /// 国家代码
    pub country: Option<String>,
}

impl ViewMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}
