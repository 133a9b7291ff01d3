//! 二维码图片（公开，可永久缓存）

use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::trace;

use crate::config::get_config;
use crate::errors::{QrLinkerError, Result};
use crate::services::{BusinessService, Platform, qr};

use super::admin::error_from_qrlinker;

pub struct QrService {}

impl QrService {
    /// GET /qr/{slug}/{platform}.png
    pub async fn platform_qr(
        path: web::Path<(String, String)>,
        businesses: web::Data<Arc<BusinessService>>,
    ) -> impl Responder {
        let (slug, platform) = path.into_inner();
        let result = async {
            let platform = Platform::parse(&platform)?;
            let business = businesses.get(&slug).await?;
            let base_url = get_config().base_url().to_string();
            render(move || qr::render_platform_qr(&base_url, &business.slug, platform)).await
        }
        .await;
        png_response(result)
    }

    /// GET /qr/ai/{slug}/{platform}.png
    pub async fn ai_poster_qr(
        path: web::Path<(String, String)>,
        businesses: web::Data<Arc<BusinessService>>,
    ) -> impl Responder {
        let (slug, platform) = path.into_inner();
        let result = async {
            let business = businesses.get(&slug).await?;
            let base_url = get_config().base_url().to_string();
            render(move || qr::render_ai_qr(&base_url, &business.slug, &platform)).await
        }
        .await;
        png_response(result)
    }
}

/// 编码在阻塞线程池中执行
async fn render<F>(f: F) -> Result<Vec<u8>>
where
    F: FnOnce() -> Result<Vec<u8>> + Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| QrLinkerError::qr_encoding(format!("QR render task failed: {}", e)))?
}

fn png_response(result: Result<Vec<u8>>) -> HttpResponse {
    match result {
        Ok(bytes) => {
            trace!("Serving QR image ({} bytes)", bytes.len());
            HttpResponse::Ok()
                .insert_header((CONTENT_TYPE, "image/png"))
                .insert_header((CACHE_CONTROL, qr::QR_CACHE_CONTROL))
                .body(bytes)
        }
        Err(e) => error_from_qrlinker(&e),
    }
}

/// AI 海报路由需在通用路由之前注册
pub fn qr_routes() -> actix_web::Scope {
    web::scope("/qr")
        .route(
            "/ai/{slug}/{platform}.png",
            web::get().to(QrService::ai_poster_qr),
        )
        .route("/{slug}/{platform}.png", web::get().to(QrService::platform_qr))
}
