//! EventStore implementation for SeaOrmEventStore
//!
//! 每个操作都经过 `retry::with_retry`；计数累加使用
//! `UPDATE pages SET views = views + 1`，由数据库保证原子性。
//! 事件插入和计数累加不是幂等的，只按 `is_retryable_write_error` 重试。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, ExprTrait, PaginatorTrait,
    QueryFilter, QueryOrder, sea_query::Expr,
};
use tracing::{debug, trace};

use super::SeaOrmEventStore;
use super::converters::{model_to_page, model_to_view_event};
use super::retry;
use crate::analytics::DeviceType;
use crate::errors::{BioviewError, Result};
use crate::storage::{EventStore, Page, ViewEvent};

use migration::entities::{page, page_analytics};

impl SeaOrmEventStore {
    async fn find_page_model(&self, owner_id: i64) -> Result<Option<page::Model>> {
        let db = &self.db;
        let model = retry::with_retry(
            &format!("find_page_by_owner({})", owner_id),
            self.retry_config,
            || async {
                page::Entity::find()
                    .filter(page::Column::UserId.eq(owner_id))
                    .one(db)
                    .await
            },
        )
        .await?;
        Ok(model)
    }
}

#[async_trait]
impl EventStore for SeaOrmEventStore {
    fn backend_name(&self) -> &str {
        &self.backend_name
    }

    async fn ping(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| BioviewError::database_connection(e.to_string()))
    }

    async fn find_page_by_owner(&self, owner_id: i64) -> Result<Option<Page>> {
        Ok(self.find_page_model(owner_id).await?.map(model_to_page))
    }

    async fn create_page(&self, owner_id: i64) -> Result<Page> {
        if let Some(existing) = self.find_page_model(owner_id).await? {
            return Ok(model_to_page(existing));
        }

        let inserted = page::ActiveModel {
            user_id: Set(owner_id),
            views: Set(0),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await;

        match inserted {
            Ok(model) => {
                debug!("Page {} created for owner {}", model.id, owner_id);
                Ok(model_to_page(model))
            }
            // 并发创建时唯一约束冲突，返回对方创建的页面
            Err(e) => match self.find_page_model(owner_id).await? {
                Some(existing) => Ok(model_to_page(existing)),
                None => Err(BioviewError::database_operation(format!(
                    "创建页面失败 (owner {}): {}",
                    owner_id, e
                ))),
            },
        }
    }

    async fn insert_view_event(
        &self,
        page_id: i64,
        device: DeviceType,
        timestamp: DateTime<Utc>,
    ) -> Result<ViewEvent> {
        let db = &self.db;
        let model = retry::with_retry_if(
            &format!("insert_view_event({})", page_id),
            self.retry_config,
            retry::is_retryable_write_error,
            || {
                let active = page_analytics::ActiveModel {
                    page_id: Set(page_id),
                    device_type: Set(device.as_str().to_string()),
                    created_at: Set(timestamp),
                    ..Default::default()
                };
                async move { active.insert(db).await }
            },
        )
        .await?;

        trace!("View event {} inserted for page {}", model.id, page_id);
        Ok(model_to_view_event(model))
    }

    async fn find_most_recent_event(
        &self,
        page_id: i64,
        device: DeviceType,
        min_timestamp: DateTime<Utc>,
    ) -> Result<Option<ViewEvent>> {
        let db = &self.db;
        let model = retry::with_retry(
            &format!("find_most_recent_event({})", page_id),
            self.retry_config,
            || async {
                page_analytics::Entity::find()
                    .filter(page_analytics::Column::PageId.eq(page_id))
                    .filter(page_analytics::Column::DeviceType.eq(device.as_str()))
                    .filter(page_analytics::Column::CreatedAt.gte(min_timestamp))
                    .order_by_desc(page_analytics::Column::CreatedAt)
                    .order_by_desc(page_analytics::Column::Id)
                    .one(db)
                    .await
            },
        )
        .await?;

        Ok(model.map(model_to_view_event))
    }

    async fn increment_page_view_counter(
        &self,
        page_id: i64,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry_if(
            &format!("increment_page_view_counter({})", page_id),
            self.retry_config,
            retry::is_retryable_write_error,
            || async {
                page::Entity::update_many()
                    .col_expr(page::Column::Views, Expr::col(page::Column::Views).add(1))
                    .col_expr(page::Column::UpdatedAt, Expr::val(timestamp))
                    .filter(page::Column::Id.eq(page_id))
                    .exec(db)
                    .await
            },
        )
        .await?;

        if result.rows_affected == 0 {
            return Err(BioviewError::not_found(format!("Page {} not found", page_id)));
        }
        Ok(())
    }

    async fn find_events_in_range(
        &self,
        page_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ViewEvent>> {
        let db = &self.db;
        let models = retry::with_retry(
            &format!("find_events_in_range({})", page_id),
            self.retry_config,
            || async {
                page_analytics::Entity::find()
                    .filter(page_analytics::Column::PageId.eq(page_id))
                    .filter(page_analytics::Column::CreatedAt.gte(start))
                    .filter(page_analytics::Column::CreatedAt.lte(end))
                    .order_by_asc(page_analytics::Column::CreatedAt)
                    .order_by_asc(page_analytics::Column::Id)
                    .all(db)
                    .await
            },
        )
        .await?;

        Ok(models.into_iter().map(model_to_view_event).collect())
    }

    async fn count_events_in_range(
        &self,
        page_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64> {
        let db = &self.db;
        let count = retry::with_retry(
            &format!("count_events_in_range({})", page_id),
            self.retry_config,
            || async {
                page_analytics::Entity::find()
                    .filter(page_analytics::Column::PageId.eq(page_id))
                    .filter(page_analytics::Column::CreatedAt.gte(start))
                    .filter(page_analytics::Column::CreatedAt.lte(end))
                    .count(db)
                    .await
            },
        )
        .await?;

        Ok(count)
    }
}
