pub mod admin;
pub mod health;
pub mod public;
pub mod qr;
pub mod redirect;

use actix_web::web;

use crate::api::middleware::AdminAuth;

pub use health::{AppStartTime, HealthService, health_routes};
pub use public::public_routes;
pub use qr::{QrService, qr_routes};
pub use redirect::{RedirectService, redirect_routes, scan_context};

/// 注册全部路由
///
/// 管理端（`/`、`/business/**`、`/admin/**`）包裹 Basic 认证，其余公开。
pub fn configure_routes(auth: AdminAuth) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(health_routes())
            .service(redirect_routes())
            .service(qr_routes())
            .configure(public_routes)
            .service(admin::routes::business_routes().wrap(auth.clone()))
            .service(admin::routes::ai_admin_routes().wrap(auth.clone()))
            .service(admin::routes::index_resource().wrap(auth));
    }
}
