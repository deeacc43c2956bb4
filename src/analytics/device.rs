//! User-Agent 设备分类
//!
//! 按子串匹配（忽略大小写）把 User-Agent 归入 desktop / mobile / tablet。
//! 平板标记优先于手机标记：同时命中两类时归为 tablet。

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

const TABLET_MARKERS: &[&str] = &["ipad", "tablet", "playbook", "silk"];
const MOBILE_MARKERS: &[&str] = &["mobile", "android", "iphone", "ipod", "webos", "blackberry"];

/// 设备类型
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Desktop,
    Mobile,
    Tablet,
}

impl DeviceType {
    /// 存储用的小写名称（desktop / mobile / tablet）
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
        }
    }

    /// 展示用的名称（Desktop / Mobile / Tablet）
    pub fn label(&self) -> &'static str {
        match self {
            Self::Desktop => "Desktop",
            Self::Mobile => "Mobile",
            Self::Tablet => "Tablet",
        }
    }

    /// 根据 User-Agent 判断设备类型，缺失或为空时视为 desktop
    pub fn classify(user_agent: Option<&str>) -> Self {
        let Some(ua) = user_agent.filter(|ua| !ua.is_empty()) else {
            return Self::Desktop;
        };

        let ua = ua.to_ascii_lowercase();
        if TABLET_MARKERS.iter().any(|m| ua.contains(m)) {
            Self::Tablet
        } else if MOBILE_MARKERS.iter().any(|m| ua.contains(m)) {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }
}
