//! BusinessService tests
//!
//! Business creation, theme updates, platform URL changes and cascade delete
//! against a temporary SQLite database.

use std::sync::{Arc, Once};

use qrlinker::config::init_config;
use qrlinker::errors::QrLinkerError;
use qrlinker::services::{BusinessInput, BusinessService, RedirectEngine, ScanContext};
use qrlinker::storage::SeaOrmStorage;
use tempfile::TempDir;

// =============================================================================
// Test Setup
// =============================================================================

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_test_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("business_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");
    (Arc::new(storage), temp_dir)
}

fn joes_cafe() -> BusinessInput {
    BusinessInput {
        name: Some("  Joe's Cafe ".to_string()),
        instagram_url: Some("https://instagram.com/joe".to_string()),
        tiktok_url: Some("   ".to_string()),
        steps: Some("Scan the code\n\n  Follow us  \nShow the staff".to_string()),
        ..Default::default()
    }
}

// =============================================================================
// Create
// =============================================================================

#[actix_rt::test]
async fn test_create_derives_slug_and_steps() {
    let (storage, _dir) = create_test_storage().await;
    let service = BusinessService::new(storage);

    let business = service.create(joes_cafe()).await.unwrap();
    assert_eq!(business.slug, "joe-s-cafe");
    assert_eq!(business.name, "Joe's Cafe");
    assert_eq!(
        business.instagram_url.as_deref(),
        Some("https://instagram.com/joe")
    );
    assert_eq!(business.tiktok_url, None);
    assert_eq!(business.cta_label.as_deref(), Some("left"));
    assert_eq!(business.qr_layout, "vertical");

    let steps = service.steps(business.id).await.unwrap();
    let orders: Vec<i32> = steps.iter().map(|s| s.order).collect();
    let texts: Vec<&str> = steps.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(orders, vec![1, 2, 3]);
    assert_eq!(texts, vec!["Scan the code", "Follow us", "Show the staff"]);
}

#[actix_rt::test]
async fn test_create_explicit_slug_is_slugified() {
    let (storage, _dir) = create_test_storage().await;
    let service = BusinessService::new(storage);

    let input = BusinessInput {
        name: Some("Pizza Place".to_string()),
        slug: Some("Best PIZZA!!".to_string()),
        ..Default::default()
    };
    let business = service.create(input).await.unwrap();
    assert_eq!(business.slug, "best-pizza");
}

#[actix_rt::test]
async fn test_create_validation_errors() {
    let (storage, _dir) = create_test_storage().await;
    let service = BusinessService::new(storage);

    let missing_name = service.create(BusinessInput::default()).await;
    assert!(matches!(missing_name, Err(QrLinkerError::Validation(_))));

    let bad_slug = BusinessInput {
        name: Some("!!!".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        service.create(bad_slug).await,
        Err(QrLinkerError::Validation(_))
    ));

    service.create(joes_cafe()).await.unwrap();
    let duplicate = service.create(joes_cafe()).await;
    assert!(matches!(duplicate, Err(QrLinkerError::Validation(_))));
    assert_eq!(service.list().await.unwrap().len(), 1);
}

// =============================================================================
// Theme / URL updates
// =============================================================================

#[actix_rt::test]
async fn test_update_theme_replaces_steps() {
    let (storage, _dir) = create_test_storage().await;
    let service = BusinessService::new(storage);
    let business = service.create(joes_cafe()).await.unwrap();

    let update = BusinessInput {
        brand_color: Some("#112233".to_string()),
        cta_label: Some("right".to_string()),
        show_logo: true,
        qr_layout: Some("horizontal".to_string()),
        youtube_url: Some("https://youtube.com/@joe".to_string()),
        steps: Some("Only step".to_string()),
        ..Default::default()
    };
    let updated = service.update_theme(&business.slug, update).await.unwrap();

    // 名称缺省时保留原值，URL 按表单整体覆盖
    assert_eq!(updated.name, "Joe's Cafe");
    assert_eq!(updated.brand_color.as_deref(), Some("#112233"));
    assert_eq!(updated.cta_label.as_deref(), Some("right"));
    assert!(updated.show_logo);
    assert_eq!(updated.qr_layout, "horizontal");
    assert_eq!(updated.instagram_url, None);
    assert_eq!(
        updated.youtube_url.as_deref(),
        Some("https://youtube.com/@joe")
    );

    let steps = service.steps(business.id).await.unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].order, 1);
    assert_eq!(steps[0].text, "Only step");
}

#[actix_rt::test]
async fn test_update_platform_url_history() {
    let (storage, _dir) = create_test_storage().await;
    let service = BusinessService::new(storage);
    let business = service.create(joes_cafe()).await.unwrap();

    let updated = service
        .update_platform_url(&business.slug, "TikTok", Some(" https://tiktok.com/@joe "))
        .await
        .unwrap();
    assert_eq!(updated.tiktok_url.as_deref(), Some("https://tiktok.com/@joe"));

    // 清空：商家字段为 NULL，历史记录中为空字符串
    let cleared = service
        .update_platform_url(&business.slug, "instagram", Some(""))
        .await
        .unwrap();
    assert_eq!(cleared.instagram_url, None);

    let detail = service.detail(&business.slug).await.unwrap();
    assert_eq!(detail.history.len(), 2);

    let newest = &detail.history[0];
    assert_eq!(newest.platform, "INSTAGRAM");
    assert_eq!(newest.from_url.as_deref(), Some("https://instagram.com/joe"));
    assert_eq!(newest.to_url, "");

    let oldest = &detail.history[1];
    assert_eq!(oldest.platform, "TIKTOK");
    assert_eq!(oldest.from_url, None);
    assert_eq!(oldest.to_url, "https://tiktok.com/@joe");
}

#[actix_rt::test]
async fn test_update_platform_url_errors() {
    let (storage, _dir) = create_test_storage().await;
    let service = BusinessService::new(storage);
    let business = service.create(joes_cafe()).await.unwrap();

    let unknown_platform = service
        .update_platform_url(&business.slug, "facebook", Some("https://fb.com"))
        .await;
    assert!(matches!(
        unknown_platform,
        Err(QrLinkerError::InvalidPlatform(_))
    ));

    // 商家不存在优先于平台校验
    let missing = service
        .update_platform_url("nope", "facebook", Some("https://fb.com"))
        .await;
    assert!(matches!(missing, Err(QrLinkerError::NotFound(_))));

    let detail = service.detail(&business.slug).await.unwrap();
    assert!(detail.history.is_empty());
}

#[actix_rt::test]
async fn test_toggle_platform() {
    let (storage, _dir) = create_test_storage().await;
    let service = BusinessService::new(storage);
    let business = service.create(joes_cafe()).await.unwrap();

    let off = service
        .toggle_platform(&business.slug, "instagram", false, None)
        .await
        .unwrap();
    assert_eq!(off.instagram_url, None);

    let enable_without_url = service
        .toggle_platform(&business.slug, "instagram", true, None)
        .await;
    assert!(matches!(
        enable_without_url,
        Err(QrLinkerError::Validation(_))
    ));

    let on = service
        .toggle_platform(&business.slug, "instagram", true, Some("https://instagram.com/joe2"))
        .await
        .unwrap();
    assert_eq!(on.instagram_url.as_deref(), Some("https://instagram.com/joe2"));

    let history = service.detail(&business.slug).await.unwrap().history;
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].to_url, "");
}

// =============================================================================
// Delete
// =============================================================================

#[actix_rt::test]
async fn test_delete_cascades() {
    let (storage, _dir) = create_test_storage().await;
    let service = BusinessService::new(storage.clone());
    let engine = RedirectEngine::new(storage.clone());

    let business = service.create(joes_cafe()).await.unwrap();
    storage.ensure_ai_config(business.id).await.unwrap();
    service
        .update_platform_url(&business.slug, "youtube", Some("https://youtube.com/@joe"))
        .await
        .unwrap();
    engine
        .resolve(&business.slug, "instagram", ScanContext::default())
        .await
        .unwrap();

    service.delete(&business.slug).await.unwrap();

    assert!(matches!(
        service.get(&business.slug).await,
        Err(QrLinkerError::NotFound(_))
    ));
    assert!(storage.find_ai_config(business.id).await.unwrap().is_none());
    assert!(storage.list_steps(business.id).await.unwrap().is_empty());
    assert!(storage.list_history(business.id).await.unwrap().is_empty());
    assert!(storage.list_scan_events(business.id).await.unwrap().is_empty());

    assert!(matches!(
        service.delete(&business.slug).await,
        Err(QrLinkerError::NotFound(_))
    ));
}
