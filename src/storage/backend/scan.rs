//! 扫码事件的写入与统计查询

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect,
    ActiveValue::{NotSet, Set},
};
use tracing::trace;

use super::SeaOrmStorage;
use super::converters::model_to_scan_event;
use crate::errors::{QrLinkerError, Result};
use crate::storage::models::{NewScanEvent, PlatformCount, ScanEvent};

use migration::entities::scan_event;

/// 按平台分组计数的结果行
#[derive(Debug, FromQueryResult)]
struct PlatformCountRow {
    platform: String,
    count: i64,
}

impl SeaOrmStorage {
    /// 写入一条扫码事件（只追加，不更新）
    pub async fn record_scan_event(&self, event: NewScanEvent) -> Result<()> {
        let platform = event.platform.clone();
        scan_event::ActiveModel {
            id: NotSet,
            business_id: Set(event.business_id),
            platform: Set(event.platform),
            user_agent: Set(event.user_agent),
            ip_hash: Set(event.ip_hash),
            referer: Set(event.referer),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| QrLinkerError::database_operation(format!("写入扫码事件失败: {}", e)))?;

        trace!("Scan event recorded: business={} platform={}", event.business_id, platform);
        Ok(())
    }

    /// 按平台标签统计扫码次数
    pub async fn count_scans_by_platform(&self, business_id: i32) -> Result<Vec<PlatformCount>> {
        let rows = scan_event::Entity::find()
            .select_only()
            .column(scan_event::Column::Platform)
            .column_as(scan_event::Column::Id.count(), "count")
            .filter(scan_event::Column::BusinessId.eq(business_id))
            .group_by(scan_event::Column::Platform)
            .order_by_asc(scan_event::Column::Platform)
            .into_model::<PlatformCountRow>()
            .all(&self.db)
            .await
            .map_err(|e| QrLinkerError::database_operation(format!("统计扫码事件失败: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|r| PlatformCount {
                platform: r.platform,
                count: r.count,
            })
            .collect())
    }

    /// 商家的扫码事件明细，按写入顺序
    pub async fn list_scan_events(&self, business_id: i32) -> Result<Vec<ScanEvent>> {
        let models = scan_event::Entity::find()
            .filter(scan_event::Column::BusinessId.eq(business_id))
            .order_by_asc(scan_event::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_scan_event).collect())
    }
}
