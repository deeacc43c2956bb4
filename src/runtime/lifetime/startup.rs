use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::analytics::{AnalyticsAggregator, ViewRecorder};
use crate::config::StaticConfig;
use crate::storage::{EventStore, StorageFactory};

/// 组装根：存储只在这里创建一次，再注入 recorder 和 aggregator
#[derive(Clone)]
pub struct StartupContext {
    pub store: Arc<dyn EventStore>,
    pub recorder: ViewRecorder,
    pub aggregator: AnalyticsAggregator,
}

impl StartupContext {
    /// 使用已有存储构建上下文（测试中传入内存存储）
    pub fn from_store(
        store: Arc<dyn EventStore>,
        config: &StaticConfig,
    ) -> crate::errors::Result<Self> {
        let recorder = ViewRecorder::new(store.clone(), &config.analytics)?;
        let aggregator = AnalyticsAggregator::new(store.clone(), &config.analytics)?;
        Ok(Self {
            store,
            recorder,
            aggregator,
        })
    }
}

/// 准备服务器启动的上下文
pub async fn prepare_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    config
        .analytics
        .validate()
        .context("Invalid analytics configuration")?;

    let store = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        store.backend_config().storage_type
    );

    let ctx = StartupContext::from_store(store, config)
        .context("Failed to initialize analytics")?;
    debug!(
        "Analytics initialized: dedup window {}s, summary {} days",
        config.analytics.dedup_window_secs, config.analytics.summary_days
    );

    debug!("Pre-startup processing completed in {:?}", start_time.elapsed());
    Ok(ctx)
}
