use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ai_review_configs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub business_id: i32,
    pub platform: String,
    pub default_tone: Option<String>,
    pub default_length: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub headline: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub disclaimer: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub poster_footer: Option<String>,
    // 以下 llm_* 字段只存储，不在服务内调用
    pub llm_enabled: bool,
    pub llm_provider: Option<String>,
    pub llm_model: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub llm_system: Option<String>,
    pub llm_temp: Option<f64>,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
