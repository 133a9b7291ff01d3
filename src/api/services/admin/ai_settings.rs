//! AI 评价设置（管理端）

use actix_web::{Responder, web};
use std::sync::Arc;

use crate::config::get_config;
use crate::errors::Result;
use crate::services::{AiConfigService, AiSettingsInput, AiSettingsScope, BusinessService, qr};
use crate::utils::form::FormValues;

use super::helpers::{api_result, form_result};
use super::types::AiAdminView;

async fn build_admin_view(
    slug: &str,
    businesses: &BusinessService,
    ai: &AiConfigService,
) -> Result<AiAdminView> {
    let business = businesses.get(slug).await?;
    let config = ai.ensure(business.id).await?;
    Ok(AiAdminView {
        target_url: business.google_review_url.clone(),
        poster_path: format!("/ai-poster/{}/{}", business.slug, config.platform),
        qr_path: qr::ai_qr_image_path(&business.slug, &config.platform),
        business,
        config,
        base_url: get_config().base_url().to_string(),
    })
}

/// GET /admin/ai/{slug} - 编辑页（首次访问时创建默认配置）
pub async fn ai_settings_view(
    path: web::Path<String>,
    businesses: web::Data<Arc<BusinessService>>,
    ai: web::Data<Arc<AiConfigService>>,
) -> impl Responder {
    let slug = path.into_inner();
    api_result(build_admin_view(&slug, &businesses, &ai).await)
}

async fn save_with_scope(
    slug: String,
    input: AiSettingsInput,
    scope: AiSettingsScope,
    businesses: &BusinessService,
    ai: &AiConfigService,
) -> Result<String> {
    let business = businesses.get(&slug).await?;
    match scope {
        AiSettingsScope::Poster => ai.save_poster_settings(&business, &input).await?,
        AiSettingsScope::Llm => ai.save_llm_settings(&business, &input).await?,
        AiSettingsScope::All => ai.save(&business, &input, scope).await?,
    };
    Ok(format!("/admin/ai/{}", business.slug))
}

/// POST /admin/ai/{slug}/save - 全部字段（部分更新）
pub async fn save_ai_settings(
    path: web::Path<String>,
    form: web::Form<FormValues>,
    businesses: web::Data<Arc<BusinessService>>,
    ai: web::Data<Arc<AiConfigService>>,
) -> impl Responder {
    let result = save_with_scope(
        path.into_inner(),
        AiSettingsInput::from(form.into_inner()),
        AiSettingsScope::All,
        &businesses,
        &ai,
    )
    .await;
    form_result(result, |location| location)
}

/// POST /admin/ai/{slug}/save-poster - 海报文案 + Google 链接
pub async fn save_ai_poster_settings(
    path: web::Path<String>,
    form: web::Form<FormValues>,
    businesses: web::Data<Arc<BusinessService>>,
    ai: web::Data<Arc<AiConfigService>>,
) -> impl Responder {
    let result = save_with_scope(
        path.into_inner(),
        AiSettingsInput::from(form.into_inner()),
        AiSettingsScope::Poster,
        &businesses,
        &ai,
    )
    .await;
    form_result(result, |location| location)
}

/// POST /admin/ai/{slug}/save-llm - 模型透传配置
pub async fn save_ai_llm_settings(
    path: web::Path<String>,
    form: web::Form<FormValues>,
    businesses: web::Data<Arc<BusinessService>>,
    ai: web::Data<Arc<AiConfigService>>,
) -> impl Responder {
    let result = save_with_scope(
        path.into_inner(),
        AiSettingsInput::from(form.into_inner()),
        AiSettingsScope::Llm,
        &businesses,
        &ai,
    )
    .await;
    form_result(result, |location| location)
}
