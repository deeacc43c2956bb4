//! Profile page entity holding the deduplicated view counter

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "pages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub views: i64,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::page_analytics::Entity")]
    PageAnalytics,
}

impl Related<super::page_analytics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PageAnalytics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
