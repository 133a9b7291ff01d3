//! Append-only audit log of platform URL changes

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "redirect_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub business_id: i32,
    pub platform: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub from_url: Option<String>,
    /// 清空时为空字符串而不是 NULL
    #[sea_orm(column_type = "Text")]
    pub to_url: String,
    pub changed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
