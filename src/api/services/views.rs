use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::trace;

use super::response::error_from_bioview;
use crate::analytics::{ViewMetadata, ViewRecorder};
use crate::errors::BioviewError;

/// 国家代码由 CDN 注入
const COUNTRY_HEADER: &str = "cf-ipcountry";

/// 解析路径中的 owner id
pub(crate) fn parse_owner_id(raw: &str) -> Result<i64, BioviewError> {
    raw.parse::<i64>()
        .map_err(|_| BioviewError::validation(format!("Invalid owner id: {}", raw)))
}

fn header_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// 从请求头提取浏览元数据
pub(crate) fn extract_metadata(req: &HttpRequest) -> ViewMetadata {
    ViewMetadata {
        user_agent: header_value(req, "user-agent"),
        referer: header_value(req, "referer"),
        country: header_value(req, COUNTRY_HEADER),
    }
}

pub struct ViewService;

impl ViewService {
    /// 记录一次主页浏览
    ///
    /// 记录在后台任务中完成，请求立即返回 202，统计失败不会影响页面访问。
    pub async fn record_view(
        req: HttpRequest,
        path: web::Path<String>,
        recorder: web::Data<ViewRecorder>,
    ) -> impl Responder {
        let owner_id = match parse_owner_id(&path.into_inner()) {
            Ok(id) => id,
            Err(e) => return error_from_bioview(&e),
        };

        let metadata = extract_metadata(&req);
        trace!("Queueing view for owner {}", owner_id);

        // 不等待结果
        let _ = recorder.spawn_record(owner_id, metadata);

        HttpResponse::Accepted().finish()
    }
}
