mod common;

use chrono::Duration;
use shortlink::domain::AccessIntent;
use shortlink::domain::entities::ShortUrl;
use shortlink::error::AppError;

#[tokio::test]
async fn test_round_trip_resolves_original_url() {
    let (state, _repository) = common::create_test_state(common::memory_cache());

    let stored = state
        .shorten_service
        .shorten("https://example.com/some/long/path?q=1")
        .await
        .unwrap();

    let resolved = state.redirect_service.resolve(&stored.code).await.unwrap();

    assert_eq!(resolved.code(), stored.code);
    assert_eq!(resolved.original_url(), "https://example.com/some/long/path?q=1");
}

#[tokio::test]
async fn test_resolve_after_shorten_is_served_from_cache() {
    let (state, repository) = common::create_test_state(common::memory_cache());

    let stored = state
        .shorten_service
        .shorten("http://ok.com")
        .await
        .unwrap();

    let resolved = state.redirect_service.resolve(&stored.code).await.unwrap();

    assert!(resolved.is_from_cache());
    assert_eq!(repository.saves(), 1);
    assert_eq!(repository.reads(), 0);
}

#[tokio::test]
async fn test_cache_miss_reads_store_once_then_hits_cache() {
    let (state, repository) = common::create_test_state(common::memory_cache());
    repository.insert_record(common::record_created_ago(
        1,
        "seeded01",
        "https://example.com/seeded",
        Duration::hours(1),
    ));

    let first = state.redirect_service.resolve("seeded01").await.unwrap();
    let second = state.redirect_service.resolve("seeded01").await.unwrap();

    assert!(matches!(first, ShortUrl::Stored(_)));
    assert!(second.is_from_cache());
    assert_eq!(second.original_url(), "https://example.com/seeded");
    assert_eq!(repository.reads(), 1);
    assert_eq!(repository.intents(), vec![AccessIntent::ReadOnly]);
}

#[tokio::test]
async fn test_expired_record_is_not_found() {
    let (state, repository) = common::create_test_state(common::memory_cache());
    repository.insert_record(common::record_created_ago(
        1,
        "expired1",
        "https://example.com/old",
        Duration::hours(25),
    ));

    let result = state.redirect_service.resolve("expired1").await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));

    // Not repopulated: a second attempt goes to the store again
    let _ = state.redirect_service.resolve("expired1").await;
    assert_eq!(repository.reads(), 2);
}

#[tokio::test]
async fn test_unknown_code_is_not_found() {
    let (state, _repository) = common::create_test_state(common::memory_cache());

    let result = state.redirect_service.resolve("doesNotExist").await;

    match result {
        Err(AppError::NotFound { details, .. }) => assert_eq!(details["code"], "doesNotExist"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_null_cache_always_reads_store() {
    let (state, repository) = common::create_test_state(common::null_cache());

    let stored = state
        .shorten_service
        .shorten("https://example.com")
        .await
        .unwrap();

    for _ in 0..3 {
        let resolved = state.redirect_service.resolve(&stored.code).await.unwrap();
        assert!(!resolved.is_from_cache());
    }

    assert_eq!(repository.reads(), 3);
}

#[tokio::test]
async fn test_shortening_same_url_twice_yields_distinct_codes() {
    let (state, repository) = common::create_test_state(common::null_cache());

    let a = state.shorten_service.shorten("https://example.com").await.unwrap();
    let b = state.shorten_service.shorten("https://example.com").await.unwrap();

    assert_ne!(a.code, b.code);
    assert_ne!(a.id, b.id);
    assert_eq!(repository.saves(), 2);
}

#[tokio::test]
async fn test_invalid_url_never_reaches_store() {
    let (state, repository) = common::create_test_state(common::memory_cache());

    for input in ["", "ftp://x.com", "not a url"] {
        let result = state.shorten_service.shorten(input).await;
        assert!(matches!(result, Err(AppError::InvalidUrl(_))));
    }

    assert_eq!(repository.saves(), 0);
}
