//! page_analytics 表迁移
//!
//! 只追加的浏览事件日志：
//! - page_id + device_type + created_at 复合索引用于去重窗口查询
//! - page_id + created_at 索引用于按时间范围汇总

use sea_orm_migration::prelude::*;

use super::m20260301_000001_pages::Pages;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PageAnalytics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PageAnalytics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PageAnalytics::PageId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PageAnalytics::DeviceType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PageAnalytics::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_page_analytics_page_id")
                            .from(PageAnalytics::Table, PageAnalytics::PageId)
                            .to(Pages::Table, Pages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_page_analytics_dedup")
                    .table(PageAnalytics::Table)
                    .col(PageAnalytics::PageId)
                    .col(PageAnalytics::DeviceType)
                    .col(PageAnalytics::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_page_analytics_page_time")
                    .table(PageAnalytics::Table)
                    .col(PageAnalytics::PageId)
                    .col(PageAnalytics::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_page_analytics_page_time").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_page_analytics_dedup").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(PageAnalytics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PageAnalytics {
    #[sea_orm(iden = "page_analytics")]
    Table,
    Id,
    PageId,
    DeviceType,
    CreatedAt,
}
