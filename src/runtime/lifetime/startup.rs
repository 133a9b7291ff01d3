use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::services::{AiConfigService, BusinessService, RedirectEngine};
use crate::storage::{SeaOrmStorage, StorageFactory};

#[derive(Clone)]
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub business_service: Arc<BusinessService>,
    pub ai_config_service: Arc<AiConfigService>,
    pub redirect_engine: Arc<RedirectEngine>,
}

impl StartupContext {
    /// 在已有存储上组装 service（测试也走这里）
    pub fn from_storage(storage: Arc<SeaOrmStorage>) -> Self {
        Self {
            business_service: Arc::new(BusinessService::new(storage.clone())),
            ai_config_service: Arc::new(AiConfigService::new(storage.clone())),
            redirect_engine: Arc::new(RedirectEngine::new(storage.clone())),
            storage,
        }
    }
}

/// 准备服务器启动的上下文：存储（含迁移）与各 service
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    // sea-orm 的 rustls 运行时需要进程级 crypto provider
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let context = StartupContext::from_storage(storage);
    debug!("Pre-startup processing completed in {:?}", start_time.elapsed());
    Ok(context)
}
