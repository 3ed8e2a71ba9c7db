mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use shortlink::api::handlers::shorten_handler;

fn server() -> TestServer {
    let (state, _repository) = common::create_test_state(common::memory_cache());
    let app = Router::new()
        .route("/api/urls", post(shorten_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_success() {
    let server = server();

    let response = server
        .post("/api/urls")
        .json(&json!({ "url": "https://example.com/page" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let body = response.json::<serde_json::Value>();
    let code = body["code"].as_str().unwrap();
    assert_eq!(code.len(), 8);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["original_url"], "https://example.com/page");
    assert_eq!(body["short_url"], format!("{}/{}", common::BASE_URL, code));
}

#[tokio::test]
async fn test_shorten_missing_url() {
    let server = server();

    let response = server.post("/api/urls").json(&json!({})).await;

    response.assert_status_bad_request();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_blank_url() {
    let server = server();

    let response = server
        .post("/api/urls")
        .json(&json!({ "url": "   " }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let server = server();

    for url in [
        "not a url",
        "ftp://x.com",
        "/relative/path",
        "http://a.com/x\u{1}y",
        "http://a.com/x\u{7f}y",
        "http://a.com/%zz",
    ] {
        let response = server.post("/api/urls").json(&json!({ "url": url })).await;

        assert_eq!(response.status_code(), 422, "url: {:?}", url);
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["error"]["code"], "invalid_url");
    }
}
