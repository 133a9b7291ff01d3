//! Business configuration service
//!
//! 商家资料、主题、平台 URL 与步骤的增删改。所有自由文本字段都经过
//! [`normalize`]，多表写入由存储层在单个事务内完成。

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::errors::{QrLinkerError, Result};
use crate::services::Platform;
use crate::storage::{
    Business, BusinessProfile, NewBusiness, PlatformUrls, RedirectHistoryEntry, SeaOrmStorage,
    Step, ThemeUpdate, UrlChange,
};
use crate::utils::form::{FormValues, cta_align, normalize, qr_layout, slugify, split_steps};

// ============ Request/Response DTOs ============

/// 创建 / 主题表单的原始字段
///
/// 值未经处理；表单字段名见 [`BusinessInput::from`]。
#[derive(Debug, Clone, Default)]
pub struct BusinessInput {
    pub name: Option<String>,
    pub slug: Option<String>,
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
    pub qr_layout: Option<String>,
    pub instagram_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub youtube_url: Option<String>,
    pub google_review_url: Option<String>,
    pub steps: Option<String>,
}

impl From<FormValues> for BusinessInput {
    fn from(form: FormValues) -> Self {
        Self {
            name: form.last("name"),
            slug: form.last("slug"),
            logo_url: form.last("logoUrl"),
            logo_bg_color: form.last("logoBgColor"),
            brand_color: form.last("brandColor"),
            cta_label: form.last("ctaLabel"),
            cta_text: form.last("ctaText"),
            cta_color: form.last("ctaColor"),
            cta_bg_color: form.last("ctaBgColor"),
            public_title: form.last("publicTitle"),
            public_subtitle: form.last("publicSubtitle"),
            public_footer: form.last("publicFooter"),
            show_logo: form.flag("showLogo").unwrap_or(false),
            qr_layout: form.last("qrLayout"),
            instagram_url: form.last("instagramUrl"),
            tiktok_url: form.last("tiktokUrl"),
            youtube_url: form.last("youtubeUrl"),
            google_review_url: form.last("googleReviewUrl"),
            steps: form.last("steps"),
        }
    }
}

impl BusinessInput {
    fn profile(&self) -> BusinessProfile {
        BusinessProfile {
            logo_url: normalize(self.logo_url.as_deref()),
            logo_bg_color: normalize(self.logo_bg_color.as_deref()),
            brand_color: normalize(self.brand_color.as_deref()),
            cta_label: Some(cta_align(self.cta_label.as_deref()).to_string()),
            cta_text: normalize(self.cta_text.as_deref()),
            cta_color: normalize(self.cta_color.as_deref()),
            cta_bg_color: normalize(self.cta_bg_color.as_deref()),
            public_title: normalize(self.public_title.as_deref()),
            public_subtitle: normalize(self.public_subtitle.as_deref()),
            public_footer: normalize(self.public_footer.as_deref()),
            show_logo: self.show_logo,
            qr_layout: qr_layout(self.qr_layout.as_deref()).to_string(),
        }
    }

    fn urls(&self) -> PlatformUrls {
        PlatformUrls {
            instagram_url: normalize(self.instagram_url.as_deref()),
            tiktok_url: normalize(self.tiktok_url.as_deref()),
            youtube_url: normalize(self.youtube_url.as_deref()),
            google_review_url: normalize(self.google_review_url.as_deref()),
        }
    }

    fn steps(&self) -> Vec<String> {
        split_steps(self.steps.as_deref())
    }
}

/// 管理页面所需的完整视图
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDetail {
    pub business: Business,
    pub steps: Vec<Step>,
    pub history: Vec<RedirectHistoryEntry>,
}

// ============ BusinessService Implementation ============

pub struct BusinessService {
    storage: Arc<SeaOrmStorage>,
}

impl BusinessService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 按 slug 查找商家，不存在返回 NotFound
    pub async fn get(&self, slug: &str) -> Result<Business> {
        self.storage
            .find_business_by_slug(slug)
            .await?
            .ok_or_else(|| QrLinkerError::not_found(format!("Business not found: {}", slug)))
    }

    pub async fn list(&self) -> Result<Vec<Business>> {
        self.storage.list_businesses().await
    }

    pub async fn steps(&self, business_id: i32) -> Result<Vec<Step>> {
        self.storage.list_steps(business_id).await
    }

    pub async fn detail(&self, slug: &str) -> Result<BusinessDetail> {
        let business = self.get(slug).await?;
        let steps = self.storage.list_steps(business.id).await?;
        let history = self.storage.list_history(business.id).await?;
        Ok(BusinessDetail {
            business,
            steps,
            history,
        })
    }

    /// 创建商家
    ///
    /// slug 未提供时由名称生成；提供时同样经过 slug 化。
    pub async fn create(&self, input: BusinessInput) -> Result<Business> {
        let name = normalize(input.name.as_deref())
            .ok_or_else(|| QrLinkerError::validation("Business name is required"))?;

        let slug = match normalize(input.slug.as_deref()) {
            Some(custom) => slugify(&custom),
            None => slugify(&name),
        };
        if slug.is_empty() {
            return Err(QrLinkerError::validation(format!(
                "Cannot derive a URL-safe slug from '{}'",
                input.slug.as_deref().unwrap_or(&name)
            )));
        }

        if self.storage.find_business_by_slug(&slug).await?.is_some() {
            return Err(QrLinkerError::validation(format!(
                "Slug already exists: {}",
                slug
            )));
        }

        let new = NewBusiness {
            slug,
            name,
            profile: input.profile(),
            urls: input.urls(),
        };
        self.storage.create_business(new, &input.steps()).await
    }

    /// 覆盖品牌字段、平台 URL，并整体替换步骤
    pub async fn update_theme(&self, slug: &str, input: BusinessInput) -> Result<Business> {
        let existing = self.get(slug).await?;

        let update = ThemeUpdate {
            name: normalize(input.name.as_deref()).unwrap_or(existing.name),
            profile: input.profile(),
            urls: input.urls(),
        };
        self.storage
            .update_theme(existing.id, update, &input.steps())
            .await
    }

    /// 更新单个平台 URL，并追加一条历史记录
    pub async fn update_platform_url(
        &self,
        slug: &str,
        platform_key: &str,
        new_url: Option<&str>,
    ) -> Result<Business> {
        let business = self.get(slug).await?;
        let platform = Platform::parse(platform_key)?;

        let change = UrlChange {
            platform,
            from_url: business.url_for(platform).map(str::to_string),
            to_url: normalize(new_url),
        };
        self.storage.apply_url_change(business.id, change).await
    }

    /// 旧版开关接口
    ///
    /// 关闭时清空 URL；开启时使用新 URL 或已有 URL，两者都没有则校验失败。
    pub async fn toggle_platform(
        &self,
        slug: &str,
        platform_key: &str,
        enabled: bool,
        new_url: Option<&str>,
    ) -> Result<Business> {
        let business = self.get(slug).await?;
        let platform = Platform::parse(platform_key)?;
        let current = business.url_for(platform).map(str::to_string);

        let to_url = if enabled {
            let url = normalize(new_url).or_else(|| current.clone()).ok_or_else(|| {
                QrLinkerError::validation("Provide a URL to enable this platform.")
            })?;
            Some(url)
        } else {
            None
        };

        info!(
            "Toggling {} for {}: {}",
            platform.label(),
            business.slug,
            if enabled { "on" } else { "off" }
        );
        let change = UrlChange {
            platform,
            from_url: current,
            to_url,
        };
        self.storage.apply_url_change(business.id, change).await
    }

    /// 级联删除商家
    pub async fn delete(&self, slug: &str) -> Result<()> {
        let business = self.get(slug).await?;
        self.storage.delete_business(business.id).await?;
        info!("Business removed: {}", slug);
        Ok(())
    }
}
