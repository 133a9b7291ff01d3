use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};

use crate::storage::models::{
    AiReviewConfig, Business, BusinessProfile, NewBusiness, PlatformUrls, RedirectHistoryEntry,
    ScanEvent, Step,
};
use migration::entities::{ai_review_config, business, redirect_history, scan_event, step};

/// 将 Sea-ORM Model 转换为 Business
pub fn model_to_business(model: business::Model) -> Business {
    Business {
        id: model.id,
        slug: model.slug,
        name: model.name,
        logo_url: model.logo_url,
        logo_bg_color: model.logo_bg_color,
        brand_color: model.brand_color,
        cta_label: model.cta_label,
        cta_text: model.cta_text,
        cta_color: model.cta_color,
        cta_bg_color: model.cta_bg_color,
        public_title: model.public_title,
        public_subtitle: model.public_subtitle,
        public_footer: model.public_footer,
        show_logo: model.show_logo,
        qr_layout: model.qr_layout,
        instagram_url: model.instagram_url,
        tiktok_url: model.tiktok_url,
        youtube_url: model.youtube_url,
        google_review_url: model.google_review_url,
        created_at: model.created_at,
    }
}

/// 新建商家的 ActiveModel
pub fn new_business_to_active_model(new: &NewBusiness) -> business::ActiveModel {
    let mut active = business::ActiveModel {
        id: NotSet,
        slug: Set(new.slug.clone()),
        name: Set(new.name.clone()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    apply_profile(&mut active, &new.profile);
    apply_urls(&mut active, &new.urls);
    active
}

/// 覆盖品牌 / 主题字段
pub fn apply_profile(active: &mut business::ActiveModel, profile: &BusinessProfile) {
    active.logo_url = Set(profile.logo_url.clone());
    active.logo_bg_color = Set(profile.logo_bg_color.clone());
    active.brand_color = Set(profile.brand_color.clone());
    active.cta_label = Set(profile.cta_label.clone());
    active.cta_text = Set(profile.cta_text.clone());
    active.cta_color = Set(profile.cta_color.clone());
    active.cta_bg_color = Set(profile.cta_bg_color.clone());
    active.public_title = Set(profile.public_title.clone());
    active.public_subtitle = Set(profile.public_subtitle.clone());
    active.public_footer = Set(profile.public_footer.clone());
    active.show_logo = Set(profile.show_logo);
    active.qr_layout = Set(profile.qr_layout.clone());
}

/// 覆盖四个平台 URL
pub fn apply_urls(active: &mut business::ActiveModel, urls: &PlatformUrls) {
    active.instagram_url = Set(urls.instagram_url.clone());
    active.tiktok_url = Set(urls.tiktok_url.clone());
    active.youtube_url = Set(urls.youtube_url.clone());
    active.google_review_url = Set(urls.google_review_url.clone());
}

pub fn model_to_step(model: step::Model) -> Step {
    Step {
        id: model.id,
        business_id: model.business_id,
        order: model.order,
        text: model.text,
    }
}

/// 步骤序号从 1 开始连续编号
pub fn steps_to_active_models(business_id: i32, steps: &[String]) -> Vec<step::ActiveModel> {
    steps
        .iter()
        .enumerate()
        .map(|(i, text)| step::ActiveModel {
            id: NotSet,
            business_id: Set(business_id),
            order: Set(i as i32 + 1),
            text: Set(text.clone()),
        })
        .collect()
}

pub fn model_to_history(model: redirect_history::Model) -> RedirectHistoryEntry {
    RedirectHistoryEntry {
        id: model.id,
        business_id: model.business_id,
        platform: model.platform,
        from_url: model.from_url,
        to_url: model.to_url,
        changed_at: model.changed_at,
    }
}

pub fn model_to_scan_event(model: scan_event::Model) -> ScanEvent {
    ScanEvent {
        id: model.id,
        business_id: model.business_id,
        platform: model.platform,
        user_agent: model.user_agent,
        ip_hash: model.ip_hash,
        referer: model.referer,
        created_at: model.created_at,
    }
}

pub fn model_to_ai_config(model: ai_review_config::Model) -> AiReviewConfig {
    AiReviewConfig {
        id: model.id,
        business_id: model.business_id,
        platform: model.platform,
        default_tone: model.default_tone,
        default_length: model.default_length,
        headline: model.headline,
        disclaimer: model.disclaimer,
        poster_footer: model.poster_footer,
        llm_enabled: model.llm_enabled,
        llm_provider: model.llm_provider,
        llm_model: model.llm_model,
        llm_system: model.llm_system,
        llm_temp: model.llm_temp,
        updated_at: model.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    #[test]
    fn test_steps_are_numbered_from_one() {
        let steps = vec!["Scan".to_string(), "Review".to_string(), "Share".to_string()];
        let models = steps_to_active_models(7, &steps);
        assert_eq!(models.len(), 3);
        for (i, model) in models.iter().enumerate() {
            assert_eq!(model.order, ActiveValue::Set(i as i32 + 1));
            assert_eq!(model.business_id, ActiveValue::Set(7));
        }
        assert_eq!(models[2].text, ActiveValue::Set("Share".to_string()));
    }

    #[test]
    fn test_new_business_active_model() {
        let new = NewBusiness {
            slug: "joes-cafe".to_string(),
            name: "Joe's Cafe".to_string(),
            profile: BusinessProfile {
                cta_label: Some("left".to_string()),
                qr_layout: "vertical".to_string(),
                ..Default::default()
            },
            urls: PlatformUrls {
                google_review_url: Some("https://g.page/r/joe".to_string()),
                ..Default::default()
            },
        };
        let active = new_business_to_active_model(&new);
        assert!(matches!(active.id, ActiveValue::NotSet));
        assert_eq!(active.slug, ActiveValue::Set("joes-cafe".to_string()));
        assert_eq!(active.instagram_url, ActiveValue::Set(None));
        assert_eq!(
            active.google_review_url,
            ActiveValue::Set(Some("https://g.page/r/joe".to_string()))
        );
        assert_eq!(active.show_logo, ActiveValue::Set(false));
    }
}
