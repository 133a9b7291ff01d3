use std::sync::Arc;

use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{
    AiConfigPatch, AiReviewConfig, Business, BusinessProfile, NewBusiness, NewScanEvent,
    PlatformCount, PlatformUrls, RedirectHistoryEntry, ScanEvent, Step, ThemeUpdate, UrlChange,
};

pub struct StorageFactory;

impl StorageFactory {
    /// 按全局配置中的 database_url 创建存储
    pub async fn create() -> Result<Arc<SeaOrmStorage>> {
        let config = crate::config::get_config();
        Self::create_with_url(&config.database.database_url).await
    }

    pub async fn create_with_url(database_url: &str) -> Result<Arc<SeaOrmStorage>> {
        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = SeaOrmStorage::new(database_url, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
