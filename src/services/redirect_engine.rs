//! Redirect & analytics engine
//!
//! 解析 (slug, platform) 为目标 URL。存在目标时先写入扫码事件，
//! 写入完成后才返回目标，调用方据此发出重定向。

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};

use crate::errors::{QrLinkerError, Result};
use crate::services::Platform;
use crate::storage::{Business, NewScanEvent, PlatformCount, SeaOrmStorage};

/// 扫码请求的客户端信息（IP 已哈希）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanContext {
    pub user_agent: Option<String>,
    pub ip_hash: Option<String>,
    pub referer: Option<String>,
}

/// 解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 重定向到外部平台
    Target(String),
    /// 平台未配置，回退到商家落地页
    Landing { slug: String },
}

impl Resolution {
    /// 重定向地址（落地页为站内相对路径）
    pub fn location(&self) -> String {
        match self {
            Resolution::Target(url) => url.clone(),
            Resolution::Landing { slug } => format!("/p/{}", slug),
        }
    }
}

/// analytics.json 的响应结构
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub business: String,
    pub counts: Vec<PlatformCount>,
}

pub struct RedirectEngine {
    storage: Arc<SeaOrmStorage>,
}

impl RedirectEngine {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 先校验平台，再查商家
    pub async fn resolve(
        &self,
        slug: &str,
        platform_key: &str,
        ctx: ScanContext,
    ) -> Result<Resolution> {
        let platform = Platform::parse(platform_key)?;
        let business = self.find_business(slug).await?;

        let Some(target) = business.url_for(platform).map(str::to_string) else {
            debug!(
                "No {} URL for {}, falling back to landing page",
                platform.key(),
                business.slug
            );
            return Ok(Resolution::Landing {
                slug: business.slug,
            });
        };

        self.record(&business, platform.label(), ctx).await?;
        debug!("Redirect {}/{} -> {}", business.slug, platform.key(), target);
        Ok(Resolution::Target(target))
    }

    /// AI 评价表单访问，事件标签为 `AI_REVIEW_<PLATFORM>`
    pub async fn record_ai_review_visit(
        &self,
        business: &Business,
        platform: &str,
        ctx: ScanContext,
    ) -> Result<()> {
        let label = format!("AI_REVIEW_{}", platform.to_uppercase());
        self.record(business, label, ctx).await
    }

    /// 按平台统计扫码次数
    pub async fn analytics(&self, slug: &str) -> Result<AnalyticsSummary> {
        let business = self.find_business(slug).await?;
        let counts = self.storage.count_scans_by_platform(business.id).await?;
        Ok(AnalyticsSummary {
            business: business.slug,
            counts,
        })
    }

    async fn find_business(&self, slug: &str) -> Result<Business> {
        self.storage
            .find_business_by_slug(slug)
            .await?
            .ok_or_else(|| QrLinkerError::not_found(format!("Business not found: {}", slug)))
    }

    async fn record(&self, business: &Business, label: String, ctx: ScanContext) -> Result<()> {
        let event = NewScanEvent {
            business_id: business.id,
            platform: label,
            user_agent: ctx.user_agent,
            ip_hash: ctx.ip_hash,
            referer: ctx.referer,
        };
        self.storage.record_scan_event(event).await.map_err(|e| {
            error!("Failed to record scan event for {}: {}", business.slug, e);
            e
        })
    }
}
