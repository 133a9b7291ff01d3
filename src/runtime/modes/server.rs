//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::configure_routes;
use crate::api::middleware::AdminAuth;
use crate::api::services::AppStartTime;
use crate::runtime::lifetime::{self, startup::StartupContext};

/// 注册共享状态与全部路由
///
/// 服务器与集成测试共用同一套装配。
pub fn configure_app(
    context: &StartupContext,
    auth: AdminAuth,
    app_start_time: AppStartTime,
) -> impl FnOnce(&mut web::ServiceConfig) {
    let storage = context.storage.clone();
    let business_service = context.business_service.clone();
    let ai_config_service = context.ai_config_service.clone();
    let redirect_engine = context.redirect_engine.clone();

    move |cfg| {
        cfg.app_data(web::Data::new(storage))
            .app_data(web::Data::new(business_service))
            .app_data(web::Data::new(ai_config_service))
            .app_data(web::Data::new(redirect_engine))
            .app_data(web::Data::new(app_start_time))
            .app_data(web::FormConfig::default().limit(64 * 1024))
            .app_data(web::JsonConfig::default().limit(64 * 1024))
            .configure(configure_routes(auth));
    }
}

/// Run the HTTP server
///
/// 1. Records startup time
/// 2. Prepares storage (migrations) and services
/// 3. Configures and starts the HTTP server
/// 4. Listens for graceful shutdown signals
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime::now();

    let context = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let config = crate::config::get_config();
    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    // 凭据只在启动时读取一次
    let auth = AdminAuth::from_config();
    let db_for_shutdown = context.storage.get_db().clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            // 只在响应未设置时生效，二维码的 immutable 缓存头不受影响
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .configure(configure_app(&context, auth.clone(), app_start_time.clone()))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(&bind_address)?.run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
