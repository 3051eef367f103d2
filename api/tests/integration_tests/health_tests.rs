//! Integration tests for liveness endpoints.

use axum::http::StatusCode;
use serde_json::json;

use super::common::{app_replying, get, test_app};
use shared::llm::CannedSqlGenerator;
use shared::storage::InMemoryDatabase;

#[tokio::test]
async fn test_root_status() {
    let app = app_replying("SELECT 1");

    let (status, response) = get(app.router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({"status": "Chat-with-data API running"}));
}

#[tokio::test]
async fn test_health_check() {
    let app = app_replying("SELECT 1");

    let (status, response) = get(app.router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "healthy");
    assert_eq!(response["service"], "chat-with-data-api");
}

#[tokio::test]
async fn test_liveness_does_not_touch_backends() {
    let app = test_app(
        InMemoryDatabase::unavailable("down"),
        CannedSqlGenerator::replying("SELECT 1"),
    );

    let (status, _) = get(app.router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.generator.calls(), 0);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = app_replying("SELECT 1");

    let (status, _) = get(app.router, "/api/v1/logs").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
