//! 公开页面：海报、AI 评价表单与生成接口、AI 海报

use actix_web::{Either, HttpRequest, HttpResponse, Responder, web};
use std::sync::Arc;

use crate::config::get_config;
use crate::errors::{QrLinkerError, Result};
use crate::services::draft::{self, DraftRequest};
use crate::services::{AiConfigService, BusinessService, RedirectEngine, qr};
use crate::storage::backend::{DEFAULT_AI_HEADLINE, DEFAULT_AI_PLATFORM};
use crate::utils::form::normalize;

use super::admin::helpers::platform_links;
use super::admin::{
    AiPosterView, AiReviewFormView, AiReviewQuery, DraftResponse, PosterView, api_result,
    error_from_qrlinker,
};
use super::redirect::scan_context;

async fn poster_view(slug: &str, businesses: &BusinessService, is_public: bool) -> Result<PosterView> {
    let business = businesses.get(slug).await?;
    let steps = businesses.steps(business.id).await?;
    Ok(PosterView {
        platforms: platform_links(&business, true),
        business,
        steps,
        is_public,
    })
}

/// GET /p/{slug}
pub async fn public_poster(
    path: web::Path<String>,
    businesses: web::Data<Arc<BusinessService>>,
) -> impl Responder {
    api_result(poster_view(&path.into_inner(), &businesses, true).await)
}

/// GET /poster/{slug} - 打印预览
pub async fn poster_preview(
    path: web::Path<String>,
    businesses: web::Data<Arc<BusinessService>>,
) -> impl Responder {
    api_result(poster_view(&path.into_inner(), &businesses, false).await)
}

/// GET /ai-review/{slug}?platform=
///
/// 平台优先级：查询参数 > 已保存配置 > google。只读，不创建配置。
pub async fn ai_review_form(
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<AiReviewQuery>,
    businesses: web::Data<Arc<BusinessService>>,
    ai: web::Data<Arc<AiConfigService>>,
    engine: web::Data<Arc<RedirectEngine>>,
) -> impl Responder {
    let slug = path.into_inner();
    let result = async {
        let business = businesses.get(&slug).await?;
        let config = ai.find(business.id).await?;

        let platform = normalize(query.platform.as_deref())
            .or_else(|| config.as_ref().map(|c| c.platform.clone()))
            .unwrap_or_else(|| DEFAULT_AI_PLATFORM.to_string())
            .to_lowercase();

        // 与 /r 一致：访问记录写入成功后才返回页面
        engine
            .record_ai_review_visit(&business, &platform, scan_context(&req))
            .await?;

        let target_url = if platform == DEFAULT_AI_PLATFORM {
            business.google_review_url.clone()
        } else {
            None
        };

        Ok::<_, QrLinkerError>(AiReviewFormView {
            target_url,
            default_tone: config.as_ref().and_then(|c| c.default_tone.clone()),
            default_length: config.as_ref().and_then(|c| c.default_length.clone()),
            headline: config.as_ref().and_then(|c| c.headline.clone()),
            disclaimer: config.as_ref().and_then(|c| c.disclaimer.clone()),
            business,
            platform,
        })
    }
    .await;
    api_result(result)
}

/// POST /ai-review/{slug}/generate
///
/// 接受 JSON 或表单，成功时直接返回 `{"draft": "..."}`。
pub async fn generate_review_draft(
    path: web::Path<String>,
    body: Either<web::Json<DraftRequest>, web::Form<DraftRequest>>,
    businesses: web::Data<Arc<BusinessService>>,
) -> impl Responder {
    let request = match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };
    match businesses.get(&path.into_inner()).await {
        Ok(business) => HttpResponse::Ok().json(DraftResponse {
            draft: draft::generate_draft(&business.name, &request),
        }),
        Err(e) => error_from_qrlinker(&e),
    }
}

/// GET /ai-poster/{slug}/{platform}
pub async fn ai_poster(
    path: web::Path<(String, String)>,
    businesses: web::Data<Arc<BusinessService>>,
    ai: web::Data<Arc<AiConfigService>>,
) -> impl Responder {
    let (slug, platform) = path.into_inner();
    let result = async {
        let business = businesses.get(&slug).await?;
        let config = ai.find(business.id).await?;
        let platform = platform.to_lowercase();
        let base_url = get_config().base_url().to_string();

        Ok::<_, QrLinkerError>(AiPosterView {
            headline: config
                .as_ref()
                .and_then(|c| c.headline.clone())
                .or_else(|| Some(DEFAULT_AI_HEADLINE.to_string())),
            poster_footer: config.and_then(|c| c.poster_footer),
            review_url: qr::ai_review_url(&base_url, &business.slug, &platform),
            qr_path: qr::ai_qr_image_path(&business.slug, &platform),
            business,
            platform,
        })
    }
    .await;
    api_result(result)
}

pub fn public_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/p/{slug}", web::get().to(public_poster))
        .route("/poster/{slug}", web::get().to(poster_preview))
        .route("/ai-review/{slug}", web::get().to(ai_review_form))
        .route(
            "/ai-review/{slug}/generate",
            web::post().to(generate_review_draft),
        )
        .route("/ai-poster/{slug}/{platform}", web::get().to(ai_poster));
}
