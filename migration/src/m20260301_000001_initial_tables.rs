//! 初始表结构
//!
//! - businesses: 商家主表（slug 唯一）
//! - steps: 引导步骤（按 business 有序）
//! - redirect_history: 平台链接变更审计日志（只追加）
//! - scan_events: 扫码 / 表单访问日志（只追加）
//! - ai_review_configs: AI 评价配置（每个商家至多一条）
//!
//! 所有子表通过外键级联删除。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. businesses
        manager
            .create_table(
                Table::create()
                    .table(Businesses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Businesses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Businesses::Slug).string_len(255).not_null())
                    .col(ColumnDef::new(Businesses::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Businesses::LogoUrl).text().null())
                    .col(ColumnDef::new(Businesses::LogoBgColor).string_len(32).null())
                    .col(ColumnDef::new(Businesses::BrandColor).string_len(32).null())
                    .col(ColumnDef::new(Businesses::CtaLabel).string_len(16).null())
                    .col(ColumnDef::new(Businesses::CtaText).text().null())
                    .col(ColumnDef::new(Businesses::CtaColor).string_len(32).null())
                    .col(ColumnDef::new(Businesses::CtaBgColor).string_len(32).null())
                    .col(ColumnDef::new(Businesses::PublicTitle).text().null())
                    .col(ColumnDef::new(Businesses::PublicSubtitle).text().null())
                    .col(ColumnDef::new(Businesses::PublicFooter).text().null())
                    .col(
                        ColumnDef::new(Businesses::ShowLogo)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Businesses::QrLayout)
                            .string_len(16)
                            .not_null()
                            .default("vertical"),
                    )
                    .col(ColumnDef::new(Businesses::InstagramUrl).text().null())
                    .col(ColumnDef::new(Businesses::TiktokUrl).text().null())
                    .col(ColumnDef::new(Businesses::YoutubeUrl).text().null())
                    .col(ColumnDef::new(Businesses::GoogleReviewUrl).text().null())
                    .col(
                        ColumnDef::new(Businesses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_businesses_slug")
                    .table(Businesses::Table)
                    .col(Businesses::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 2. steps
        manager
            .create_table(
                Table::create()
                    .table(Steps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Steps::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Steps::BusinessId).integer().not_null())
                    .col(ColumnDef::new(Steps::Order).integer().not_null())
                    .col(ColumnDef::new(Steps::Text).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_steps_business")
                            .from(Steps::Table, Steps::BusinessId)
                            .to(Businesses::Table, Businesses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_steps_business_order")
                    .table(Steps::Table)
                    .col(Steps::BusinessId)
                    .col(Steps::Order)
                    .to_owned(),
            )
            .await?;

        // 3. redirect_history
        manager
            .create_table(
                Table::create()
                    .table(RedirectHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RedirectHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RedirectHistory::BusinessId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RedirectHistory::Platform)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RedirectHistory::FromUrl).text().null())
                    .col(ColumnDef::new(RedirectHistory::ToUrl).text().not_null())
                    .col(
                        ColumnDef::new(RedirectHistory::ChangedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_redirect_history_business")
                            .from(RedirectHistory::Table, RedirectHistory::BusinessId)
                            .to(Businesses::Table, Businesses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_redirect_history_business")
                    .table(RedirectHistory::Table)
                    .col(RedirectHistory::BusinessId)
                    .to_owned(),
            )
            .await?;

        // 4. scan_events
        manager
            .create_table(
                Table::create()
                    .table(ScanEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScanEvents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScanEvents::BusinessId).integer().not_null())
                    .col(ColumnDef::new(ScanEvents::Platform).string_len(64).not_null())
                    .col(ColumnDef::new(ScanEvents::UserAgent).text().null())
                    .col(ColumnDef::new(ScanEvents::IpHash).string_len(64).null())
                    .col(ColumnDef::new(ScanEvents::Referer).text().null())
                    .col(
                        ColumnDef::new(ScanEvents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scan_events_business")
                            .from(ScanEvents::Table, ScanEvents::BusinessId)
                            .to(Businesses::Table, Businesses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 复合索引（按商家 + 平台分组计数）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scan_events_business_platform")
                    .table(ScanEvents::Table)
                    .col(ScanEvents::BusinessId)
                    .col(ScanEvents::Platform)
                    .to_owned(),
            )
            .await?;

        // 5. ai_review_configs
        manager
            .create_table(
                Table::create()
                    .table(AiReviewConfigs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AiReviewConfigs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AiReviewConfigs::BusinessId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiReviewConfigs::Platform)
                            .string_len(32)
                            .not_null()
                            .default("google"),
                    )
                    .col(
                        ColumnDef::new(AiReviewConfigs::DefaultTone)
                            .string_len(32)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AiReviewConfigs::DefaultLength)
                            .string_len(32)
                            .null(),
                    )
                    .col(ColumnDef::new(AiReviewConfigs::Headline).text().null())
                    .col(ColumnDef::new(AiReviewConfigs::Disclaimer).text().null())
                    .col(ColumnDef::new(AiReviewConfigs::PosterFooter).text().null())
                    .col(
                        ColumnDef::new(AiReviewConfigs::LlmEnabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AiReviewConfigs::LlmProvider)
                            .string_len(64)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AiReviewConfigs::LlmModel)
                            .string_len(128)
                            .null(),
                    )
                    .col(ColumnDef::new(AiReviewConfigs::LlmSystem).text().null())
                    .col(ColumnDef::new(AiReviewConfigs::LlmTemp).double().null())
                    .col(
                        ColumnDef::new(AiReviewConfigs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_review_configs_business")
                            .from(AiReviewConfigs::Table, AiReviewConfigs::BusinessId)
                            .to(Businesses::Table, Businesses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一索引：一个商家只能有一条配置
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ai_review_configs_business")
                    .table(AiReviewConfigs::Table)
                    .col(AiReviewConfigs::BusinessId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 先删子表，再删主表
        manager
            .drop_table(Table::drop().table(AiReviewConfigs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ScanEvents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RedirectHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Steps::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Businesses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Businesses {
    #[sea_orm(iden = "businesses")]
    Table,
    Id,
    Slug,
    Name,
    LogoUrl,
    LogoBgColor,
    BrandColor,
    CtaLabel,
    CtaText,
    CtaColor,
    CtaBgColor,
    PublicTitle,
    PublicSubtitle,
    PublicFooter,
    ShowLogo,
    QrLayout,
    InstagramUrl,
    TiktokUrl,
    YoutubeUrl,
    GoogleReviewUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Steps {
    #[sea_orm(iden = "steps")]
    Table,
    Id,
    BusinessId,
    #[sea_orm(iden = "step_order")]
    Order,
    Text,
}

#[derive(DeriveIden)]
enum RedirectHistory {
    #[sea_orm(iden = "redirect_history")]
    Table,
    Id,
    BusinessId,
    Platform,
    FromUrl,
    ToUrl,
    ChangedAt,
}

#[derive(DeriveIden)]
enum ScanEvents {
    #[sea_orm(iden = "scan_events")]
    Table,
    Id,
    BusinessId,
    Platform,
    UserAgent,
    IpHash,
    Referer,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AiReviewConfigs {
    #[sea_orm(iden = "ai_review_configs")]
    Table,
    Id,
    BusinessId,
    Platform,
    DefaultTone,
    DefaultLength,
    Headline,
    Disclaimer,
    PosterFooter,
    LlmEnabled,
    LlmProvider,
    LlmModel,
    LlmSystem,
    LlmTemp,
    UpdatedAt,
}
