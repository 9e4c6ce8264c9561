mod common;

use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use chrono::{Duration, SecondsFormat, Utc};
use common::{GUIDE_ORIGIN, MemoryTrailRepository, RecordingCache};
use serde_json::json;
use std::sync::Arc;
use trails::api::handlers::{create_trail_handler, redirect_handler};
use trails::state::AppState;

fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/create_trail", post(create_trail_handler))
        .route("/{trail_id}", get(redirect_handler))
        .with_state(state)
}

fn test_server(repo: Arc<MemoryTrailRepository>) -> TestServer {
    let state = common::create_test_state(repo, Arc::new(RecordingCache::default()));
    TestServer::new(create_app(state)).unwrap()
}

#[tokio::test]
async fn test_create_trail_success() {
    let repo = Arc::new(MemoryTrailRepository::default());
    let server = test_server(repo.clone());

    let response = server
        .post("/api/v1/create_trail")
        .json(&json!({ "url": "https://example.com/some/long/path" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let id = json["id"].as_str().unwrap();
    assert_eq!(id.len(), 6);
    assert_eq!(json["shortUrl"], format!("{}/{}", GUIDE_ORIGIN, id));
    assert!(json["expireAt"].is_null());
    assert_eq!(repo.row_count(), 1);
}

#[tokio::test]
async fn test_create_trail_with_expiry() {
    let server = test_server(Arc::new(MemoryTrailRepository::default()));
    let expire_at = (Utc::now() + Duration::days(1)).to_rfc3339_opts(SecondsFormat::Millis, true);

    let response = server
        .post("/api/v1/create_trail")
        .json(&json!({ "url": "https://example.com", "expireAt": expire_at }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert!(json["expireAt"].is_string());
}

#[tokio::test]
async fn test_create_then_redirect() {
    let server = test_server(Arc::new(MemoryTrailRepository::default()));

    let response = server
        .post("/api/v1/create_trail")
        .json(&json!({ "url": "https://example.com/roundtrip" }))
        .await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let id = json["id"].as_str().unwrap();

    let response = server.get(&format!("/{}", id)).await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/roundtrip");
}

#[tokio::test]
async fn test_create_trail_past_expiry() {
    let repo = Arc::new(MemoryTrailRepository::default());
    let server = test_server(repo.clone());

    let response = server
        .post("/api/v1/create_trail")
        .json(&json!({
            "url": "https://example.com",
            "expireAt": "2022-01-15T06:46:00.000Z"
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(repo.row_count(), 0);
}

#[tokio::test]
async fn test_create_trail_invalid_url() {
    let server = test_server(Arc::new(MemoryTrailRepository::default()));

    let response = server
        .post("/api/v1/create_trail")
        .json(&json!({ "url": "not-a-valid-url" }))
        .await;

    assert_eq!(response.status_code(), 400);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_create_trail_missing_url() {
    let server = test_server(Arc::new(MemoryTrailRepository::default()));

    let response = server
        .post("/api/v1/create_trail")
        .json(&json!({ "expireAt": null }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_create_trail_store_outage() {
    let server = test_server(Arc::new(MemoryTrailRepository::unavailable()));

    let response = server
        .post("/api/v1/create_trail")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), 500);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "Internal server error");
}

#[tokio::test]
async fn test_create_trail_conflict_retries_then_409() {
    let repo = Arc::new(MemoryTrailRepository::with_forced_conflicts(usize::MAX));
    let server = test_server(repo.clone());

    let response = server
        .post("/api/v1/create_trail")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), 409);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "conflict");
    assert_eq!(
        json["error"]["message"],
        "Could not create trail, please try again later"
    );

    // One initial attempt plus three retries.
    assert_eq!(repo.insert_calls(), 4);
    assert_eq!(repo.row_count(), 0);
}

#[tokio::test]
async fn test_create_trail_succeeds_after_one_conflict() {
    let repo = Arc::new(MemoryTrailRepository::with_forced_conflicts(1));
    let server = test_server(repo.clone());

    let response = server
        .post("/api/v1/create_trail")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["id"].as_str().unwrap().len(), 6);
    assert_eq!(repo.insert_calls(), 2);
    assert_eq!(repo.row_count(), 1);
}
