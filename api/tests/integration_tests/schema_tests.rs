//! Integration tests for schema inspection.

use axum::http::StatusCode;
use serde_json::json;

use super::common::{app_replying, get, test_app};
use shared::llm::CannedSqlGenerator;
use shared::storage::InMemoryDatabase;

#[tokio::test]
async fn test_inspect_schema() {
    let app = app_replying("SELECT 1");

    let (status, response) = get(app.router, "/inspect-schema").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({
            "tables": ["Customer", "Invoice"],
            "schema_text": "Table Customer (id integer, name text)\nTable Invoice (id integer, total numeric)",
        })
    );
    assert_eq!(app.generator.calls(), 0);
}

#[tokio::test]
async fn test_inspect_empty_schema() {
    let app = test_app(InMemoryDatabase::new(), CannedSqlGenerator::replying("SELECT 1"));

    let (status, response) = get(app.router, "/inspect-schema").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["tables"], json!([]));
    assert_eq!(response["schema_text"], "No tables found in public schema.");
}

#[tokio::test]
async fn test_inspect_schema_database_unavailable() {
    let app = test_app(
        InMemoryDatabase::unavailable("connection refused"),
        CannedSqlGenerator::replying("SELECT 1"),
    );

    let (status, response) = get(app.router, "/inspect-schema").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response["error"],
        "Failed to load database schema: Connection failed: connection refused"
    );
}
