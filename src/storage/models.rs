use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::Platform;

/// 商家（聚合根）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub logo_url: Option<String>,
    pub logo_bg_color: Option<String>,
    pub brand_color: Option<String>,
    /// CTA 对齐方式（left / center / right）
    pub cta_label: Option<String>,
    pub cta_text: Option<String>,
    pub cta_color: Option<String>,
    pub cta_bg_color: Option<String>,
    pub public_title: Option<String>,
    pub public_subtitle: Option<String>,
    pub public_footer: Option<String>,
    pub show_logo: bool,
    pub qr_layout: String,
    pub instagram_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub youtube_url: Option<String>,
    pub google_review_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Business {
    /// 平台对应的目标 URL，None 表示该平台未启用
    pub fn url_for(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::Instagram => self.instagram_url.as_deref(),
            Platform::Tiktok => self.tiktok_url.as_deref(),
            Platform::Youtube => self.youtube_url.as_deref(),
            Platform::Google => self.google_review_url.as_deref(),
        }
    }
}

/// 品牌 / 主题字段（已规范化）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessProfile {
    pub logo_url: Option<String>,
    pub logo_bg_color: Option<String>,
    pub brand_color: Option<String>,
    pub cta_label: Option<String>,
    pub cta_text: Option<String>,
    pub cta_color: Option<String>,
    pub cta_bg_color: Option<String>,
    pub public_title: Option<String>,
    pub public_subtitle: Option<String>,
    pub public_footer: Option<String>,
    pub show_logo: bool,
    pub qr_layout: String,
}

/// 四个平台的 URL（已规范化，None 表示未启用）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformUrls {
    pub instagram_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub youtube_url: Option<String>,
    pub google_review_url: Option<String>,
}

/// 新建商家记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBusiness {
    pub slug: String,
    pub name: String,
    pub profile: BusinessProfile,
    pub urls: PlatformUrls,
}

/// 主题更新：整体覆盖品牌字段、URL 与步骤
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeUpdate {
    pub name: String,
    pub profile: BusinessProfile,
    pub urls: PlatformUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: i32,
    pub business_id: i32,
    pub order: i32,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RedirectHistoryEntry {
    pub id: i32,
    pub business_id: i32,
    pub platform: String,
    pub from_url: Option<String>,
    pub to_url: String,
    pub changed_at: DateTime<Utc>,
}

/// 平台 URL 变更（历史记录 + 商家字段，同一事务）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlChange {
    pub platform: Platform,
    pub from_url: Option<String>,
    /// None 表示清空
    pub to_url: Option<String>,
}

/// 待写入的扫码事件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewScanEvent {
    pub business_id: i32,
    pub platform: String,
    pub user_agent: Option<String>,
    pub ip_hash: Option<String>,
    pub referer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScanEvent {
    pub id: i64,
    pub business_id: i32,
    pub platform: String,
    pub user_agent: Option<String>,
    pub ip_hash: Option<String>,
    pub referer: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 按平台聚合的扫码次数
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlatformCount {
    pub platform: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiReviewConfig {
    pub id: i32,
    pub business_id: i32,
    pub platform: String,
    pub default_tone: Option<String>,
    pub default_length: Option<String>,
    pub headline: Option<String>,
    pub disclaimer: Option<String>,
    pub poster_footer: Option<String>,
    pub llm_enabled: bool,
    pub llm_provider: Option<String>,
    pub llm_model: Option<String>,
    pub llm_system: Option<String>,
    pub llm_temp: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

/// AI 配置的部分更新
///
/// 外层 `None` 表示请求中未出现该字段（保持原值）；
/// `Some(None)` 表示显式清空。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiConfigPatch {
    pub platform: Option<String>,
    pub default_tone: Option<Option<String>>,
    pub default_length: Option<Option<String>>,
    pub headline: Option<Option<String>>,
    pub disclaimer: Option<Option<String>>,
    pub poster_footer: Option<Option<String>>,
    pub llm_enabled: Option<bool>,
    pub llm_provider: Option<Option<String>>,
    pub llm_model: Option<Option<String>>,
    pub llm_system: Option<Option<String>>,
    pub llm_temp: Option<Option<f64>>,
}

impl AiConfigPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
