//! AiReviewConfig operations for SeaOrmStorage

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter,
    ActiveValue::{NotSet, Set},
    sea_query::OnConflict,
};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::business::{apply_url_change_in, commit};
use super::converters::model_to_ai_config;
use crate::errors::{QrLinkerError, Result};
use crate::storage::models::{AiConfigPatch, AiReviewConfig, UrlChange};

use migration::entities::ai_review_config;

/// 首次访问时创建的默认配置
pub const DEFAULT_AI_PLATFORM: &str = "google";
pub const DEFAULT_AI_TONE: &str = "friendly";
pub const DEFAULT_AI_LENGTH: &str = "short";
pub const DEFAULT_AI_HEADLINE: &str = "We’ll draft it for you — edit & paste";
pub const DEFAULT_AI_DISCLAIMER: &str = "Reviews are optional and appreciated.";

impl SeaOrmStorage {
    pub async fn find_ai_config(&self, business_id: i32) -> Result<Option<AiReviewConfig>> {
        let model = ai_review_config::Entity::find()
            .filter(ai_review_config::Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| QrLinkerError::database_operation(format!("查询 AI 配置失败: {}", e)))?;
        Ok(model.map(model_to_ai_config))
    }

    /// 获取或创建 AI 配置
    ///
    /// 使用 ON CONFLICT DO NOTHING 实现原子性的 "insert if not exists"，
    /// 并发首次调用时只有一个插入生效，其余调用读到同一行。
    pub async fn ensure_ai_config(&self, business_id: i32) -> Result<AiReviewConfig> {
        if let Some(existing) = self.find_ai_config(business_id).await? {
            return Ok(existing);
        }

        let model = ai_review_config::ActiveModel {
            id: NotSet,
            business_id: Set(business_id),
            platform: Set(DEFAULT_AI_PLATFORM.to_string()),
            default_tone: Set(Some(DEFAULT_AI_TONE.to_string())),
            default_length: Set(Some(DEFAULT_AI_LENGTH.to_string())),
            headline: Set(Some(DEFAULT_AI_HEADLINE.to_string())),
            disclaimer: Set(Some(DEFAULT_AI_DISCLAIMER.to_string())),
            poster_footer: Set(None),
            llm_enabled: Set(false),
            llm_provider: Set(None),
            llm_model: Set(None),
            llm_system: Set(None),
            llm_temp: Set(None),
            updated_at: Set(chrono::Utc::now()),
        };

        let result = ai_review_config::Entity::insert(model)
            .on_conflict(
                OnConflict::column(ai_review_config::Column::BusinessId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.db)
            .await;

        match result {
            Ok(_) => info!("AI review config created for business {}", business_id),
            Err(sea_orm::DbErr::RecordNotInserted) => {
                debug!("AI review config for business {} created concurrently", business_id)
            }
            Err(e) => {
                // 某些数据库后端在 do_nothing 时可能返回特定错误
                let err_str = e.to_string().to_lowercase();
                if !(err_str.contains("no rows") || err_str.contains("record not inserted")) {
                    return Err(QrLinkerError::database_operation(format!(
                        "创建 AI 配置失败: {}",
                        e
                    )));
                }
            }
        }

        self.find_ai_config(business_id).await?.ok_or_else(|| {
            QrLinkerError::database_operation(format!(
                "AI config missing after insert for business {}",
                business_id
            ))
        })
    }

    /// 只写入 patch 中出现的字段；Google 链接变化时同时写历史并更新商家
    pub async fn save_ai_config(
        &self,
        business_id: i32,
        patch: &AiConfigPatch,
        google_change: Option<UrlChange>,
    ) -> Result<AiReviewConfig> {
        // 确保存在，事务内只做更新
        self.ensure_ai_config(business_id).await?;

        let txn = self.begin().await?;

        let existing = ai_review_config::Entity::find()
            .filter(ai_review_config::Column::BusinessId.eq(business_id))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                QrLinkerError::not_found(format!("AI config not found: {}", business_id))
            })?;

        let mut active = existing.into_active_model();
        if let Some(platform) = &patch.platform {
            active.platform = Set(platform.clone());
        }
        if let Some(v) = &patch.default_tone {
            active.default_tone = Set(v.clone());
        }
        if let Some(v) = &patch.default_length {
            active.default_length = Set(v.clone());
        }
        if let Some(v) = &patch.headline {
            active.headline = Set(v.clone());
        }
        if let Some(v) = &patch.disclaimer {
            active.disclaimer = Set(v.clone());
        }
        if let Some(v) = &patch.poster_footer {
            active.poster_footer = Set(v.clone());
        }
        if let Some(v) = patch.llm_enabled {
            active.llm_enabled = Set(v);
        }
        if let Some(v) = &patch.llm_provider {
            active.llm_provider = Set(v.clone());
        }
        if let Some(v) = &patch.llm_model {
            active.llm_model = Set(v.clone());
        }
        if let Some(v) = &patch.llm_system {
            active.llm_system = Set(v.clone());
        }
        if let Some(v) = patch.llm_temp {
            active.llm_temp = Set(v);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active
            .update(&txn)
            .await
            .map_err(|e| QrLinkerError::database_operation(format!("更新 AI 配置失败: {}", e)))?;

        if let Some(change) = &google_change {
            apply_url_change_in(&txn, business_id, change).await?;
        }

        commit(txn).await?;

        info!(
            "AI review config saved for business {}{}",
            business_id,
            if google_change.is_some() {
                " (google link changed)"
            } else {
                ""
            }
        );
        Ok(model_to_ai_config(model))
    }
}
