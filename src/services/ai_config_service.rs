//! AI review configuration service
//!
//! 每个商家最多一条配置，首次访问时以固定默认值创建。保存接口只覆盖请求中
//! 出现的字段；llm_* 字段只存储，不在服务内调用任何模型。

use std::sync::Arc;

use tracing::info;

use crate::errors::{QrLinkerError, Result};
use crate::services::Platform;
use crate::storage::backend::DEFAULT_AI_PLATFORM;
use crate::storage::{AiConfigPatch, AiReviewConfig, Business, SeaOrmStorage, UrlChange};
use crate::utils::form::{FormValues, normalize};

/// AI 设置表单的原始字段，`None` 表示请求中没有该字段
#[derive(Debug, Clone, Default)]
pub struct AiSettingsInput {
    pub platform: Option<String>,
    pub default_tone: Option<String>,
    pub default_length: Option<String>,
    pub headline: Option<String>,
    pub disclaimer: Option<String>,
    pub poster_footer: Option<String>,
    pub google_review_url: Option<String>,
    pub llm_enabled: Option<bool>,
    pub llm_provider: Option<String>,
    pub llm_model: Option<String>,
    pub llm_system: Option<String>,
    pub llm_temp: Option<String>,
}

impl From<FormValues> for AiSettingsInput {
    fn from(form: FormValues) -> Self {
        Self {
            platform: form.last("platform"),
            default_tone: form.last("defaultTone"),
            default_length: form.last("defaultLength"),
            headline: form.last("headline"),
            disclaimer: form.last("disclaimer"),
            poster_footer: form.last("posterFooter"),
            google_review_url: form.last("googleReviewUrl"),
            llm_enabled: form.flag("llmEnabled"),
            llm_provider: form.last("llmProvider"),
            llm_model: form.last("llmModel"),
            llm_system: form.last("llmSystem"),
            llm_temp: form.last("llmTemp"),
        }
    }
}

/// 保存接口覆盖的字段范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiSettingsScope {
    /// 海报文案 + Google 链接
    Poster,
    /// 模型透传配置
    Llm,
    /// 全部字段
    All,
}

impl AiSettingsScope {
    fn poster(self) -> bool {
        matches!(self, AiSettingsScope::Poster | AiSettingsScope::All)
    }

    fn llm(self) -> bool {
        matches!(self, AiSettingsScope::Llm | AiSettingsScope::All)
    }
}

impl AiSettingsInput {
    /// 转换为部分更新结构，只保留 scope 内且出现在请求中的字段
    pub fn to_patch(&self, scope: AiSettingsScope) -> Result<AiConfigPatch> {
        let present = |v: &Option<String>| v.as_deref().map(|s| normalize(Some(s)));
        let mut patch = AiConfigPatch::default();

        if scope.poster() {
            patch.platform = self.platform.as_deref().map(|p| {
                normalize(Some(p))
                    .map(|p| p.to_lowercase())
                    .unwrap_or_else(|| DEFAULT_AI_PLATFORM.to_string())
            });
            patch.default_tone = present(&self.default_tone);
            patch.default_length = present(&self.default_length);
            patch.headline = present(&self.headline);
            patch.disclaimer = present(&self.disclaimer);
            patch.poster_footer = present(&self.poster_footer);
        }

        if scope.llm() {
            patch.llm_enabled = self.llm_enabled;
            patch.llm_provider = present(&self.llm_provider);
            patch.llm_model = present(&self.llm_model);
            patch.llm_system = present(&self.llm_system);
            patch.llm_temp = match self.llm_temp.as_deref() {
                None => None,
                Some(raw) => Some(parse_temperature(raw)?),
            };
        }

        Ok(patch)
    }
}

/// 空值视为未设置，非数字为校验错误
fn parse_temperature(raw: &str) -> Result<Option<f64>> {
    match normalize(Some(raw)) {
        None => Ok(None),
        Some(v) => v
            .parse::<f64>()
            .ok()
            .filter(|t| t.is_finite())
            .map(Some)
            .ok_or_else(|| QrLinkerError::validation(format!("Invalid llmTemp: {}", v))),
    }
}

pub struct AiConfigService {
    storage: Arc<SeaOrmStorage>,
}

impl AiConfigService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 获取或创建，幂等
    pub async fn ensure(&self, business_id: i32) -> Result<AiReviewConfig> {
        self.storage.ensure_ai_config(business_id).await
    }

    /// 只读，不创建
    pub async fn find(&self, business_id: i32) -> Result<Option<AiReviewConfig>> {
        self.storage.find_ai_config(business_id).await
    }

    pub async fn save_poster_settings(
        &self,
        business: &Business,
        input: &AiSettingsInput,
    ) -> Result<AiReviewConfig> {
        self.save(business, input, AiSettingsScope::Poster).await
    }

    pub async fn save_llm_settings(
        &self,
        business: &Business,
        input: &AiSettingsInput,
    ) -> Result<AiReviewConfig> {
        self.save(business, input, AiSettingsScope::Llm).await
    }

    /// 部分更新；Google 链接出现且与当前值不同时追加 GOOGLE 历史并更新商家
    pub async fn save(
        &self,
        business: &Business,
        input: &AiSettingsInput,
        scope: AiSettingsScope,
    ) -> Result<AiReviewConfig> {
        let patch = input.to_patch(scope)?;

        let google_change = if scope.poster() {
            input.google_review_url.as_deref().and_then(|raw| {
                let new_url = normalize(Some(raw));
                let current = business.google_review_url.clone();
                (new_url != current).then_some(UrlChange {
                    platform: Platform::Google,
                    from_url: current,
                    to_url: new_url,
                })
            })
        } else {
            None
        };

        if patch.is_empty() && google_change.is_none() {
            info!("AI settings for {} unchanged ({:?})", business.slug, scope);
        } else {
            info!("Saving AI settings for {} ({:?})", business.slug, scope);
        }
        self.storage
            .save_ai_config(business.id, &patch, google_change)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_stay_absent() {
        let input = AiSettingsInput {
            headline: Some("  New headline ".to_string()),
            ..Default::default()
        };
        let patch = input.to_patch(AiSettingsScope::All).unwrap();
        assert_eq!(patch.headline, Some(Some("New headline".to_string())));
        assert_eq!(patch.disclaimer, None);
        assert_eq!(patch.platform, None);
        assert_eq!(patch.llm_enabled, None);
        assert_eq!(patch.llm_temp, None);
    }

    #[test]
    fn test_present_but_empty_clears() {
        let input = AiSettingsInput {
            disclaimer: Some("   ".to_string()),
            platform: Some("".to_string()),
            llm_temp: Some("".to_string()),
            ..Default::default()
        };
        let patch = input.to_patch(AiSettingsScope::All).unwrap();
        assert_eq!(patch.disclaimer, Some(None));
        assert_eq!(patch.platform.as_deref(), Some("google"));
        assert_eq!(patch.llm_temp, Some(None));
    }

    #[test]
    fn test_scope_filters_fields() {
        let input = AiSettingsInput {
            headline: Some("Poster copy".to_string()),
            llm_model: Some("some-model".to_string()),
            llm_enabled: Some(true),
            ..Default::default()
        };
        let poster = input.to_patch(AiSettingsScope::Poster).unwrap();
        assert!(poster.headline.is_some());
        assert!(poster.llm_model.is_none());
        assert!(poster.llm_enabled.is_none());

        let llm = input.to_patch(AiSettingsScope::Llm).unwrap();
        assert!(llm.headline.is_none());
        assert_eq!(llm.llm_model, Some(Some("some-model".to_string())));
        assert_eq!(llm.llm_enabled, Some(true));
    }

    #[test]
    fn test_temperature_parsing() {
        assert_eq!(parse_temperature("0.7").unwrap(), Some(0.7));
        assert_eq!(parse_temperature(" 1 ").unwrap(), Some(1.0));
        assert_eq!(parse_temperature("").unwrap(), None);
        assert!(matches!(
            parse_temperature("warm"),
            Err(QrLinkerError::Validation(_))
        ));
        assert!(parse_temperature("NaN").is_err());
    }

    #[test]
    fn test_platform_is_lowercased() {
        let input = AiSettingsInput {
            platform: Some(" Google ".to_string()),
            ..Default::default()
        };
        let patch = input.to_patch(AiSettingsScope::Poster).unwrap();
        assert_eq!(patch.platform.as_deref(), Some("google"));
    }

    #[test]
    fn test_llm_checkbox_with_hidden_fallback() {
        let form = |pairs: &[(&str, &str)]| {
            let pairs: Vec<(String, String)> = pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            AiSettingsInput::from(FormValues::from(pairs))
        };

        let checked = form(&[("llmEnabled", "0"), ("llmEnabled", "on")]);
        assert_eq!(checked.llm_enabled, Some(true));
        let unchecked = form(&[("llmEnabled", "0")]);
        assert_eq!(unchecked.llm_enabled, Some(false));
        let absent = form(&[("llmModel", "a"), ("llmModel", "b")]);
        assert_eq!(absent.llm_enabled, None);
        assert_eq!(absent.llm_model.as_deref(), Some("b"));
    }
}
