//! Redirect engine tests
//!
//! Resolution order, landing fallback and scan event recording.

use std::sync::{Arc, Once};

use qrlinker::config::init_config;
use qrlinker::errors::QrLinkerError;
use qrlinker::services::{
    BusinessInput, BusinessService, RedirectEngine, Resolution, ScanContext,
};
use qrlinker::storage::SeaOrmStorage;
use qrlinker::utils::ip::hash_ip;
use tempfile::TempDir;

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn setup() -> (Arc<SeaOrmStorage>, RedirectEngine, TempDir) {
    init_test_config();

    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("redirect_test.db").display()
    );
    let storage = Arc::new(
        SeaOrmStorage::new(&db_url, "sqlite")
            .await
            .expect("Failed to create storage"),
    );

    BusinessService::new(storage.clone())
        .create(BusinessInput {
            name: Some("Joe's Cafe".to_string()),
            instagram_url: Some("https://instagram.com/joe".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let engine = RedirectEngine::new(storage.clone());
    (storage, engine, dir)
}

#[actix_rt::test]
async fn test_resolve_records_scan_before_redirect() {
    let (storage, engine, _dir) = setup().await;

    let ctx = ScanContext {
        user_agent: Some("Mozilla/5.0".to_string()),
        ip_hash: Some(hash_ip("203.0.113.7")),
        referer: None,
    };
    let resolution = engine.resolve("joe-s-cafe", "Instagram", ctx).await.unwrap();
    assert_eq!(
        resolution,
        Resolution::Target("https://instagram.com/joe".to_string())
    );

    let business = storage.find_business_by_slug("joe-s-cafe").await.unwrap().unwrap();
    let events = storage.list_scan_events(business.id).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].platform, "INSTAGRAM");
    assert_eq!(events[0].user_agent.as_deref(), Some("Mozilla/5.0"));
    assert_eq!(events[0].ip_hash, Some(hash_ip("203.0.113.7")));
    assert_eq!(events[0].referer, None);
}

#[actix_rt::test]
async fn test_unconfigured_platform_falls_back_without_scan() {
    let (storage, engine, _dir) = setup().await;

    let resolution = engine
        .resolve("joe-s-cafe", "tiktok", ScanContext::default())
        .await
        .unwrap();
    assert_eq!(resolution.location(), "/p/joe-s-cafe");

    let business = storage.find_business_by_slug("joe-s-cafe").await.unwrap().unwrap();
    assert!(storage.list_scan_events(business.id).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_resolve_errors() {
    let (_storage, engine, _dir) = setup().await;

    // 平台校验先于商家查找
    let invalid = engine
        .resolve("missing", "myspace", ScanContext::default())
        .await;
    assert!(matches!(invalid, Err(QrLinkerError::InvalidPlatform(_))));

    let missing = engine
        .resolve("missing", "instagram", ScanContext::default())
        .await;
    assert!(matches!(missing, Err(QrLinkerError::NotFound(_))));
}

#[actix_rt::test]
async fn test_analytics_counts_by_platform() {
    let (storage, engine, _dir) = setup().await;

    for _ in 0..3 {
        engine
            .resolve("joe-s-cafe", "instagram", ScanContext::default())
            .await
            .unwrap();
    }
    let business = storage.find_business_by_slug("joe-s-cafe").await.unwrap().unwrap();
    engine
        .record_ai_review_visit(&business, "google", ScanContext::default())
        .await
        .unwrap();

    let summary = engine.analytics("joe-s-cafe").await.unwrap();
    assert_eq!(summary.business, "joe-s-cafe");
    let counts: Vec<(&str, i64)> = summary
        .counts
        .iter()
        .map(|c| (c.platform.as_str(), c.count))
        .collect();
    assert_eq!(counts, vec![("AI_REVIEW_GOOGLE", 1), ("INSTAGRAM", 3)]);
}
