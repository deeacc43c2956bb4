pub mod analytics;
pub mod health;
pub mod response;
pub mod views;

use actix_web::web;

pub use analytics::AnalyticsApiService;
pub use health::{AppStartTime, HealthService, health_routes};
pub use response::{ApiResponse, ErrorCode};
pub use views::ViewService;

/// 主页浏览与统计路由
pub fn page_routes() -> actix_web::Scope {
    web::scope("/api/pages")
        .route("/{owner_id}/views", web::post().to(ViewService::record_view))
        .route(
            "/{owner_id}/analytics",
            web::get().to(AnalyticsApiService::summary),
        )
}
