use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "businesses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub slug: String,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub logo_url: Option<String>,
    pub logo_bg_color: Option<String>,
    pub brand_color: Option<String>,
    /// CTA 对齐方式（left / center / right）
    pub cta_label: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub cta_text: Option<String>,
    pub cta_color: Option<String>,
    pub cta_bg_color: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub public_title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub public_subtitle: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub public_footer: Option<String>,
    pub show_logo: bool,
    pub qr_layout: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub instagram_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub tiktok_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub youtube_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub google_review_url: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
