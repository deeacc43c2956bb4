use actix_web::{HttpResponse, Responder, web};
use tracing::{debug, error};

use super::response::error_from_bioview;
use super::views::parse_owner_id;
use crate::analytics::AnalyticsAggregator;
use crate::errors::BioviewError;

pub struct AnalyticsApiService;

impl AnalyticsApiService {
    /// 获取主页近期访问统计
    pub async fn summary(
        path: web::Path<String>,
        aggregator: web::Data<AnalyticsAggregator>,
    ) -> impl Responder {
        let owner_id = match parse_owner_id(&path.into_inner()) {
            Ok(id) => id,
            Err(e) => return error_from_bioview(&e),
        };

        match aggregator.summarize_recent_activity(owner_id).await {
            Ok(summary) => {
                debug!(
                    "Summary for owner {}: {} views in window",
                    owner_id, summary.total_views
                );
                HttpResponse::Ok()
                    .append_header(("Content-Type", "application/json; charset=utf-8"))
                    .json(summary)
            }
            Err(e @ BioviewError::NotFound(_)) => error_from_bioview(&e),
            Err(e) => {
                error!("Failed to summarize activity for owner {}: {}", owner_id, e);
                error_from_bioview(&e)
            }
        }
    }
}
