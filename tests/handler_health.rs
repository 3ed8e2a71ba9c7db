mod common;

use async_trait::async_trait;
use axum::{Router, routing::get};
use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;

use shortlink::api::handlers::health_handler;
use shortlink::infrastructure::cache::{CacheError, CacheResult, CacheService};
use shortlink::state::AppState;

/// Cache whose backend is down.
struct UnreachableCache;

#[async_trait]
impl CacheService for UnreachableCache {
    async fn get_url(&self, _code: &str) -> CacheResult<Option<String>> {
        Err(CacheError::ConnectionError("down".to_string()))
    }

    async fn set_url(&self, _code: &str, _url: &str, _ttl: Option<Duration>) -> CacheResult<()> {
        Err(CacheError::ConnectionError("down".to_string()))
    }

    async fn invalidate(&self, _code: &str) -> CacheResult<()> {
        Err(CacheError::ConnectionError("down".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "unreachable"
    }
}

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _repository) = common::create_test_state(common::memory_cache());

    let response = server(state).get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_endpoint_degraded_cache() {
    let (state, _repository) = common::create_test_state(Arc::new(UnreachableCache));

    let response = server(state).get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "error");
}

#[tokio::test]
async fn test_redirect_survives_unreachable_cache() {
    let (state, _repository) = common::create_test_state(Arc::new(UnreachableCache));

    let stored = state
        .shorten_service
        .shorten("https://example.com")
        .await
        .unwrap();
    let resolved = state.redirect_service.resolve(&stored.code).await.unwrap();

    assert_eq!(resolved.original_url(), "https://example.com");
    assert!(!resolved.is_from_cache());
}
