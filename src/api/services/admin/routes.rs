//! 管理端路由配置
//!
//! 所有路由都由调用方包裹 [`AdminAuth`](crate::api::middleware::AdminAuth)。

use actix_web::web;

use super::ai_settings::{
    ai_settings_view, save_ai_llm_settings, save_ai_poster_settings, save_ai_settings,
};
use super::business::{
    business_analytics, create_business, delete_business, list_businesses, manage_business,
    toggle_platform, update_platform_url, update_theme,
};

/// 首页 `/`
pub fn index_resource() -> actix_web::Resource {
    web::resource("/").route(web::get().to(list_businesses))
}

/// 商家管理路由 `/business`
///
/// 包含：
/// - POST /business - 创建
/// - GET /business/{slug} - 管理页
/// - POST /business/{slug}/theme|update|toggle|delete
/// - GET /business/{slug}/analytics.json
pub fn business_routes() -> actix_web::Scope {
    web::scope("/business")
        .route("", web::post().to(create_business))
        .route("/{slug}/analytics.json", web::get().to(business_analytics))
        .route("/{slug}/theme", web::post().to(update_theme))
        .route("/{slug}/update", web::post().to(update_platform_url))
        .route("/{slug}/toggle", web::post().to(toggle_platform))
        .route("/{slug}/delete", web::post().to(delete_business))
        .route("/{slug}", web::get().to(manage_business))
}

/// AI 设置路由 `/admin/ai`
pub fn ai_admin_routes() -> actix_web::Scope {
    web::scope("/admin/ai")
        .route("/{slug}", web::get().to(ai_settings_view))
        .route("/{slug}/save", web::post().to(save_ai_settings))
        .route("/{slug}/save-poster", web::post().to(save_ai_poster_settings))
        .route("/{slug}/save-llm", web::post().to(save_ai_llm_settings))
}
