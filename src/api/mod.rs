//! HTTP 接口层
//!
//! - `services::views`: 浏览上报（202，后台记录）
//! - `services::analytics`: 统计查询
//! - `services::health`: 健康检查

pub mod services;
