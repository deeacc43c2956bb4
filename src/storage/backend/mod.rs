//! SeaORM storage backend
//!
//! Pages and view events in SQLite, MySQL/MariaDB or PostgreSQL.

mod connection;
mod converters;
mod events;
pub mod retry;

use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::config::DatabaseConfig;
use crate::errors::{BioviewError, Result};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_page, model_to_view_event};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(BioviewError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: memory://, sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 裸文件路径补全为 sqlite:// URL
fn normalize_sqlite_url(database_url: &str) -> String {
    if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else if database_url == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite://{}", database_url)
    }
}

/// SeaORM-based event store
#[derive(Clone)]
pub struct SeaOrmEventStore {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmEventStore {
    pub async fn new(database_url: &str, backend_name: &str, config: &DatabaseConfig) -> Result<Self> {
        if database_url.is_empty() {
            return Err(BioviewError::database_config("database_url 未设置"));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(&normalize_sqlite_url(database_url)).await?
        } else {
            connect_generic(database_url, backend_name, config).await?
        };

        run_migrations(&db).await?;

        let storage = Self::from_connection(db, backend_name, retry::RetryConfig::from(config));
        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    /// 使用已建立（且已迁移）的连接
    pub fn from_connection(
        db: DatabaseConnection,
        backend_name: &str,
        retry_config: retry::RetryConfig,
    ) -> Self {
        let backend_name = match backend_name {
            "mariadb" => "mysql",
            other => other,
        };
        Self {
            db,
            backend_name: backend_name.to_string(),
            retry_config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(infer_backend_from_url("sqlite://data/bio.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("bioview.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("mariadb://localhost/bio").unwrap(), "mysql");
        assert_eq!(
            infer_backend_from_url("postgresql://localhost/bio").unwrap(),
            "postgres"
        );
        assert!(infer_backend_from_url("redis://localhost").is_err());
    }

    #[test]
    fn test_normalize_sqlite_url() {
        assert_eq!(normalize_sqlite_url("bioview.db"), "sqlite://bioview.db");
        assert_eq!(
            normalize_sqlite_url("sqlite://x.db?mode=rwc"),
            "sqlite://x.db?mode=rwc"
        );
        assert_eq!(normalize_sqlite_url(":memory:"), "sqlite::memory:");
    }
}
