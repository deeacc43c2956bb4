//! 统一 JSON 响应结构与帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::errors::BioviewError;

/// API 错误码
///
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 主页与统计错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    PageNotFound = 3000,
    AnalyticsDatabaseError = 3005,
}

impl From<&BioviewError> for ErrorCode {
    fn from(err: &BioviewError) -> Self {
        match err {
            BioviewError::NotFound(_) => ErrorCode::PageNotFound,
            BioviewError::Validation(_) => ErrorCode::BadRequest,
            BioviewError::DatabaseConnection(_) => ErrorCode::ServiceUnavailable,
            BioviewError::DatabaseOperation(_) | BioviewError::DatabaseConfig(_) => {
                ErrorCode::AnalyticsDatabaseError
            }
            BioviewError::FileOperation(_) | BioviewError::Serialization(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 BioviewError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_bioview(err: &BioviewError) -> HttpResponse {
    error_response(err.http_status(), ErrorCode::from(err), err.message())
}
