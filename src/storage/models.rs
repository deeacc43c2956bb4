use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 用户的公开主页
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub owner_id: i64,
    /// 去重后的累计浏览数
    pub views: i64,
    pub updated_at: DateTime<Utc>,
}

/// 一条被接受的浏览事件（只追加，不修改）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewEvent {
    pub id: i64,
    pub page_id: i64,
    /// 存储中的原始设备值，可能不在已知集合内
    pub device_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}
