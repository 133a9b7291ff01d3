//! Business / Step / RedirectHistory operations for SeaOrmStorage
//!
//! 所有多表写入都在单个事务内完成。

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, SqlErr, TransactionTrait,
    ActiveValue::{NotSet, Set},
    sea_query::Expr,
};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::{
    apply_profile, apply_urls, model_to_business, model_to_history, model_to_step,
    new_business_to_active_model, steps_to_active_models,
};
use crate::errors::{QrLinkerError, Result};
use crate::storage::models::{Business, NewBusiness, RedirectHistoryEntry, Step, ThemeUpdate, UrlChange};

use migration::entities::{ai_review_config, business, redirect_history, scan_event, step};

impl SeaOrmStorage {
    pub async fn find_business_by_slug(&self, slug: &str) -> Result<Option<Business>> {
        let model = business::Entity::find()
            .filter(business::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| QrLinkerError::database_operation(format!("查询商家失败: {}", e)))?;
        Ok(model.map(model_to_business))
    }

    /// 所有商家，按创建时间倒序
    pub async fn list_businesses(&self) -> Result<Vec<Business>> {
        let models = business::Entity::find()
            .order_by_desc(business::Column::CreatedAt)
            .order_by_desc(business::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| QrLinkerError::database_operation(format!("查询商家列表失败: {}", e)))?;
        Ok(models.into_iter().map(model_to_business).collect())
    }

    /// 创建商家及其步骤（同一事务）
    pub async fn create_business(&self, new: NewBusiness, steps: &[String]) -> Result<Business> {
        let txn = self.begin().await?;

        let model = new_business_to_active_model(&new)
            .insert(&txn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    QrLinkerError::validation(format!("Slug already exists: {}", new.slug))
                }
                _ => QrLinkerError::database_operation(format!("创建商家失败: {}", e)),
            })?;

        insert_steps(&txn, model.id, steps).await?;
        commit(txn).await?;

        info!(
            "Business created: {} (id={}, {} steps)",
            model.slug,
            model.id,
            steps.len()
        );
        Ok(model_to_business(model))
    }

    /// 覆盖品牌 / URL 字段并整体替换步骤（同一事务）
    pub async fn update_theme(
        &self,
        business_id: i32,
        update: ThemeUpdate,
        steps: &[String],
    ) -> Result<Business> {
        let txn = self.begin().await?;

        let existing = business::Entity::find_by_id(business_id)
            .one(&txn)
            .await?
            .ok_or_else(|| QrLinkerError::not_found(format!("Business not found: {}", business_id)))?;

        let mut active = existing.into_active_model();
        active.name = Set(update.name);
        apply_profile(&mut active, &update.profile);
        apply_urls(&mut active, &update.urls);
        let model = active
            .update(&txn)
            .await
            .map_err(|e| QrLinkerError::database_operation(format!("更新商家失败: {}", e)))?;

        replace_steps(&txn, business_id, steps).await?;
        commit(txn).await?;

        info!("Business theme updated: {} ({} steps)", model.slug, steps.len());
        Ok(model_to_business(model))
    }

    /// 追加一条历史记录并更新对应平台 URL（同一事务）
    pub async fn apply_url_change(&self, business_id: i32, change: UrlChange) -> Result<Business> {
        let txn = self.begin().await?;
        apply_url_change_in(&txn, business_id, &change).await?;

        let model = business::Entity::find_by_id(business_id)
            .one(&txn)
            .await?
            .ok_or_else(|| QrLinkerError::not_found(format!("Business not found: {}", business_id)))?;
        commit(txn).await?;

        info!(
            "Platform URL changed: {} {} -> {}",
            model.slug,
            change.platform.label(),
            change.to_url.as_deref().unwrap_or("<cleared>")
        );
        Ok(model_to_business(model))
    }

    /// 级联删除商家及全部子记录（同一事务）
    pub async fn delete_business(&self, business_id: i32) -> Result<()> {
        let txn = self.begin().await?;

        ai_review_config::Entity::delete_many()
            .filter(ai_review_config::Column::BusinessId.eq(business_id))
            .exec(&txn)
            .await?;
        redirect_history::Entity::delete_many()
            .filter(redirect_history::Column::BusinessId.eq(business_id))
            .exec(&txn)
            .await?;
        scan_event::Entity::delete_many()
            .filter(scan_event::Column::BusinessId.eq(business_id))
            .exec(&txn)
            .await?;
        step::Entity::delete_many()
            .filter(step::Column::BusinessId.eq(business_id))
            .exec(&txn)
            .await?;

        let result = business::Entity::delete_by_id(business_id)
            .exec(&txn)
            .await
            .map_err(|e| QrLinkerError::database_operation(format!("删除商家失败: {}", e)))?;

        if result.rows_affected == 0 {
            // 事务随 txn drop 回滚
            return Err(QrLinkerError::not_found(format!(
                "Business not found: {}",
                business_id
            )));
        }

        commit(txn).await?;
        info!("Business deleted: id={}", business_id);
        Ok(())
    }

    /// 商家的步骤，按序号升序
    pub async fn list_steps(&self, business_id: i32) -> Result<Vec<Step>> {
        let models = step::Entity::find()
            .filter(step::Column::BusinessId.eq(business_id))
            .order_by_asc(step::Column::Order)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_step).collect())
    }

    /// 商家的 URL 变更历史，最新的在前
    pub async fn list_history(&self, business_id: i32) -> Result<Vec<RedirectHistoryEntry>> {
        let models = redirect_history::Entity::find()
            .filter(redirect_history::Column::BusinessId.eq(business_id))
            .order_by_desc(redirect_history::Column::ChangedAt)
            .order_by_desc(redirect_history::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_history).collect())
    }

    pub(super) async fn begin(&self) -> Result<DatabaseTransaction> {
        self.db
            .begin()
            .await
            .map_err(|e| QrLinkerError::database_operation(format!("开始事务失败: {}", e)))
    }
}

pub(super) async fn commit(txn: DatabaseTransaction) -> Result<()> {
    txn.commit()
        .await
        .map_err(|e| QrLinkerError::database_operation(format!("提交事务失败: {}", e)))
}

/// 历史记录中清空表示为空字符串，商家字段中为 NULL
pub(super) async fn apply_url_change_in(
    txn: &DatabaseTransaction,
    business_id: i32,
    change: &UrlChange,
) -> Result<()> {
    redirect_history::ActiveModel {
        id: NotSet,
        business_id: Set(business_id),
        platform: Set(change.platform.label()),
        from_url: Set(change.from_url.clone()),
        to_url: Set(change.to_url.clone().unwrap_or_default()),
        changed_at: Set(chrono::Utc::now()),
    }
    .insert(txn)
    .await
    .map_err(|e| QrLinkerError::database_operation(format!("写入历史记录失败: {}", e)))?;

    let result = business::Entity::update_many()
        .col_expr(change.platform.column(), Expr::value(change.to_url.clone()))
        .filter(business::Column::Id.eq(business_id))
        .exec(txn)
        .await
        .map_err(|e| QrLinkerError::database_operation(format!("更新平台 URL 失败: {}", e)))?;

    if result.rows_affected == 0 {
        return Err(QrLinkerError::not_found(format!(
            "Business not found: {}",
            business_id
        )));
    }
    Ok(())
}

async fn insert_steps(txn: &DatabaseTransaction, business_id: i32, steps: &[String]) -> Result<()> {
    if steps.is_empty() {
        return Ok(());
    }
    step::Entity::insert_many(steps_to_active_models(business_id, steps))
        .exec(txn)
        .await
        .map_err(|e| QrLinkerError::database_operation(format!("写入步骤失败: {}", e)))?;
    Ok(())
}

/// 先删后插，不做差异比较
async fn replace_steps(txn: &DatabaseTransaction, business_id: i32, steps: &[String]) -> Result<()> {
    let deleted = step::Entity::delete_many()
        .filter(step::Column::BusinessId.eq(business_id))
        .exec(txn)
        .await?;
    debug!(
        "Replacing {} steps with {} for business {}",
        deleted.rows_affected,
        steps.len(),
        business_id
    );
    insert_steps(txn, business_id, steps).await
}
