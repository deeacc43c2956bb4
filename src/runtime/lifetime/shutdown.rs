use tokio::signal;
use tracing::{info, warn};

/// 等待 Ctrl+C
///
/// 浏览记录是独立的短任务，不需要额外的刷新步骤。
pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping server...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }
}
