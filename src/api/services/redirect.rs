use actix_web::http::header::{LOCATION, REFERER, USER_AGENT};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::trace;

use crate::services::{RedirectEngine, ScanContext};
use crate::utils::ip::client_ip_hash;

use super::admin::error_from_qrlinker;

/// 从请求中收集扫码事件所需的客户端信息
pub fn scan_context(req: &HttpRequest) -> ScanContext {
    let header = |name| {
        req.headers()
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
    };
    ScanContext {
        user_agent: header(USER_AGENT),
        ip_hash: client_ip_hash(req),
        referer: header(REFERER),
    }
}

pub struct RedirectService {}

impl RedirectService {
    /// GET /r/{slug}/{platform}
    ///
    /// 扫码事件写入完成后才返回 302。
    pub async fn handle_redirect(
        req: HttpRequest,
        path: web::Path<(String, String)>,
        engine: web::Data<Arc<RedirectEngine>>,
    ) -> impl Responder {
        let (slug, platform) = path.into_inner();
        trace!("Redirect request: {}/{}", slug, platform);

        match engine.resolve(&slug, &platform, scan_context(&req)).await {
            Ok(resolution) => HttpResponse::Found()
                .insert_header((LOCATION, resolution.location()))
                .finish(),
            Err(e) => error_from_qrlinker(&e),
        }
    }
}

pub fn redirect_routes() -> actix_web::Resource {
    web::resource("/r/{slug}/{platform}").route(web::get().to(RedirectService::handle_redirect))
}
