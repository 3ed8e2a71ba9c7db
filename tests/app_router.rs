mod common;

use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use chrono::Duration;
use serde_json::json;
use shortlink::routes::app_router;
use shortlink::state::AppState;

fn server(state: AppState) -> TestServer {
    TestServer::new(ServiceExt::<Request>::into_make_service(app_router(state))).unwrap()
}

#[tokio::test]
async fn test_health_is_not_taken_for_a_code() {
    let (state, repository) = common::create_test_state(common::memory_cache());
    let server = server(state);

    server.get("/health").await.assert_status_ok();
    assert_eq!(repository.reads(), 0);
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let (state, repository) = common::create_test_state(common::memory_cache());
    repository.insert_record(common::record_created_ago(
        1,
        "slashed1",
        "https://example.com/slashed",
        Duration::minutes(1),
    ));
    let server = server(state);

    server.get("/health/").await.assert_status_ok();

    let response = server.get("/slashed1/").await;
    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/slashed");
}

#[tokio::test]
async fn test_create_and_follow_through_full_router() {
    let (state, _repository) = common::create_test_state(common::memory_cache());
    let server = server(state);

    let created = server
        .post("/api/urls")
        .json(&json!({ "url": "https://example.com/full" }))
        .await;
    assert_eq!(created.status_code(), 201);

    let body = created.json::<serde_json::Value>();
    let code = body["code"].as_str().unwrap();
    assert_eq!(body["short_url"], format!("{}/{}", common::BASE_URL, code));

    let response = server.get(&format!("/{}", code)).await;
    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/full");

    server.get("/unknown1").await.assert_status_not_found();
}
