//! API 类型定义

use serde::{Deserialize, Serialize};

use crate::services::{BusinessDetail, Platform};
use crate::storage::{AiReviewConfig, Business, Step};
use crate::utils::form::FormValues;

/// 统一 JSON 响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

/// POST /business/{slug}/update
#[derive(Clone, Debug, Default)]
pub struct PlatformUrlForm {
    pub platform: Option<String>,
    pub new_url: Option<String>,
}

impl From<FormValues> for PlatformUrlForm {
    fn from(form: FormValues) -> Self {
        Self {
            platform: form.last("platform"),
            new_url: form.last("newUrl"),
        }
    }
}

/// POST /business/{slug}/toggle
#[derive(Clone, Debug, Default)]
pub struct PlatformToggleForm {
    pub platform: Option<String>,
    pub enabled: bool,
    pub new_url: Option<String>,
}

impl From<FormValues> for PlatformToggleForm {
    fn from(form: FormValues) -> Self {
        Self {
            platform: form.last("platform"),
            enabled: form.flag("enabled").unwrap_or(false),
            new_url: form.last("newUrl"),
        }
    }
}

/// 首页商家列表
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BusinessListView {
    pub businesses: Vec<Business>,
    pub base_url: String,
}

/// 单个平台的二维码信息
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlatformLinkView {
    pub platform: Platform,
    pub target_url: Option<String>,
    pub redirect_url: String,
    pub qr_path: String,
}

/// 商家管理页
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ManageView {
    #[serde(flatten)]
    pub detail: BusinessDetail,
    pub platforms: Vec<PlatformLinkView>,
    pub base_url: String,
}

/// 海报 / 落地页
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PosterView {
    pub business: Business,
    pub steps: Vec<Step>,
    pub platforms: Vec<PlatformLinkView>,
    pub is_public: bool,
}

/// AI 设置编辑页
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AiAdminView {
    pub business: Business,
    pub config: AiReviewConfig,
    pub target_url: Option<String>,
    pub poster_path: String,
    pub qr_path: String,
    pub base_url: String,
}

/// 公开的 AI 评价表单
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AiReviewFormView {
    pub business: Business,
    pub platform: String,
    pub target_url: Option<String>,
    pub default_tone: Option<String>,
    pub default_length: Option<String>,
    pub headline: Option<String>,
    pub disclaimer: Option<String>,
}

/// AI 海报
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AiPosterView {
    pub business: Business,
    pub platform: String,
    pub headline: Option<String>,
    pub poster_footer: Option<String>,
    pub review_url: String,
    pub qr_path: String,
}

/// 生成接口的响应
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DraftResponse {
    pub draft: String,
}

/// GET /ai-review/{slug}?platform=
#[derive(Deserialize, Clone, Debug, Default)]
pub struct AiReviewQuery {
    pub platform: Option<String>,
}

/// 健康检查
#[derive(Serialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: i64,
    pub storage: HealthStorageCheck,
    pub response_time_ms: u64,
}

#[derive(Serialize, Clone, Debug)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
