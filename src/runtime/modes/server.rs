//! Server mode
//!
//! This module contains the HTTP server startup logic.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::services::{AppStartTime, health_routes, page_routes};
use crate::runtime::lifetime;
use crate::runtime::lifetime::startup::StartupContext;

/// 注册共享数据与全部路由
///
/// 服务器和集成测试共用同一份路由配置。
pub fn configure_app(
    ctx: &StartupContext,
    app_start_time: AppStartTime,
) -> impl FnOnce(&mut web::ServiceConfig) + use<> {
    let store = ctx.store.clone();
    let recorder = ctx.recorder.clone();
    let aggregator = ctx.aggregator.clone();

    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(store))
            .app_data(web::Data::new(recorder))
            .app_data(web::Data::new(aggregator))
            .app_data(web::Data::new(app_start_time))
            .service(health_routes())
            .service(page_routes());
    }
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let config = crate::config::get_config();

    let startup = lifetime::startup::prepare_startup(&config)
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .app_data(web::PayloadConfig::new(64 * 1024))
            .configure(configure_app(&startup, app_start_time.clone()))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(bind_address)?.run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown: server stopped");
        }
    }

    Ok(())
}
