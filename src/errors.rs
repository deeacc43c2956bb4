use std::fmt;

#[derive(Debug, Clone)]
pub enum BioviewError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
}

impl BioviewError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            BioviewError::DatabaseConfig(_) => "E001",
            BioviewError::DatabaseConnection(_) => "E002",
            BioviewError::DatabaseOperation(_) => "E003",
            BioviewError::FileOperation(_) => "E004",
            BioviewError::Validation(_) => "E005",
            BioviewError::NotFound(_) => "E006",
            BioviewError::Serialization(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            BioviewError::DatabaseConfig(_) => "Database Configuration Error",
            BioviewError::DatabaseConnection(_) => "Database Connection Error",
            BioviewError::DatabaseOperation(_) => "Database Operation Error",
            BioviewError::FileOperation(_) => "File Operation Error",
            BioviewError::Validation(_) => "Validation Error",
            BioviewError::NotFound(_) => "Resource Not Found",
            BioviewError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            BioviewError::DatabaseConfig(msg)
            | BioviewError::DatabaseConnection(msg)
            | BioviewError::DatabaseOperation(msg)
            | BioviewError::FileOperation(msg)
            | BioviewError::Validation(msg)
            | BioviewError::NotFound(msg)
            | BioviewError::Serialization(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            BioviewError::NotFound(_) => StatusCode::NOT_FOUND,
            BioviewError::Validation(_) => StatusCode::BAD_REQUEST,
            BioviewError::DatabaseConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    #[cfg(feature = "server")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for BioviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for BioviewError {}

// 便捷的构造函数
impl BioviewError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        BioviewError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        BioviewError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        BioviewError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        BioviewError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        BioviewError::NotFound(msg.into())
    }
}

impl From<sea_orm::DbErr> for BioviewError {
    fn from(err: sea_orm::DbErr) -> Self {
        BioviewError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for BioviewError {
    fn from(err: std::io::Error) -> Self {
        BioviewError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for BioviewError {
    fn from(err: serde_json::Error) -> Self {
        BioviewError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BioviewError>;
