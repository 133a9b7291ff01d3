//! 商家管理（表单提交 + 管理视图）

use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{info, trace};

use crate::config::get_config;
use crate::services::{BusinessInput, BusinessService, RedirectEngine};
use crate::utils::form::FormValues;

use super::helpers::{api_result, error_from_qrlinker, form_result, platform_links};
use super::types::{BusinessListView, ManageView, PlatformToggleForm, PlatformUrlForm};

fn manage_path(slug: &str) -> String {
    format!("/business/{}", slug)
}

/// GET / - 商家列表
pub async fn list_businesses(service: web::Data<Arc<BusinessService>>) -> impl Responder {
    trace!("Admin: list businesses");
    api_result(service.list().await.map(|businesses| BusinessListView {
        businesses,
        base_url: get_config().base_url().to_string(),
    }))
}

/// POST /business - 创建商家
pub async fn create_business(
    form: web::Form<FormValues>,
    service: web::Data<Arc<BusinessService>>,
) -> impl Responder {
    let result = service.create(BusinessInput::from(form.into_inner())).await;
    form_result(result, |business| {
        info!("Admin: created business {}", business.slug);
        manage_path(&business.slug)
    })
}

/// GET /business/{slug} - 管理页
pub async fn manage_business(
    path: web::Path<String>,
    service: web::Data<Arc<BusinessService>>,
) -> impl Responder {
    let slug = path.into_inner();
    api_result(service.detail(&slug).await.map(|detail| {
        let platforms = platform_links(&detail.business, false);
        ManageView {
            detail,
            platforms,
            base_url: get_config().base_url().to_string(),
        }
    }))
}

/// POST /business/{slug}/theme - 品牌 / CTA / 步骤
pub async fn update_theme(
    path: web::Path<String>,
    form: web::Form<FormValues>,
    service: web::Data<Arc<BusinessService>>,
) -> impl Responder {
    let slug = path.into_inner();
    let result = service
        .update_theme(&slug, BusinessInput::from(form.into_inner()))
        .await;
    form_result(result, |business| manage_path(&business.slug))
}

/// POST /business/{slug}/update - 单个平台 URL
pub async fn update_platform_url(
    path: web::Path<String>,
    form: web::Form<FormValues>,
    service: web::Data<Arc<BusinessService>>,
) -> impl Responder {
    let slug = path.into_inner();
    let form = PlatformUrlForm::from(form.into_inner());
    let result = service
        .update_platform_url(
            &slug,
            form.platform.as_deref().unwrap_or_default(),
            form.new_url.as_deref(),
        )
        .await;
    form_result(result, |business| manage_path(&business.slug))
}

/// POST /business/{slug}/toggle - 旧版开关
pub async fn toggle_platform(
    path: web::Path<String>,
    form: web::Form<FormValues>,
    service: web::Data<Arc<BusinessService>>,
) -> impl Responder {
    let slug = path.into_inner();
    let form = PlatformToggleForm::from(form.into_inner());
    let result = service
        .toggle_platform(
            &slug,
            form.platform.as_deref().unwrap_or_default(),
            form.enabled,
            form.new_url.as_deref(),
        )
        .await;
    form_result(result, |business| manage_path(&business.slug))
}

/// POST /business/{slug}/delete - 级联删除
pub async fn delete_business(
    path: web::Path<String>,
    service: web::Data<Arc<BusinessService>>,
) -> impl Responder {
    let slug = path.into_inner();
    form_result(service.delete(&slug).await, |_| "/".to_string())
}

/// GET /business/{slug}/analytics.json - 按平台统计
///
/// 直接返回 `{business, counts}`，不包信封。
pub async fn business_analytics(
    path: web::Path<String>,
    engine: web::Data<Arc<RedirectEngine>>,
) -> impl Responder {
    let slug = path.into_inner();
    match engine.analytics(&slug).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => error_from_qrlinker(&e),
    }
}
