//! Common test utilities and helpers for integration tests.
//!
//! This module provides shared functionality used across all integration tests,
//! including test app setup and HTTP request helpers.

use api::{create_router, AppState, DatabaseConfig};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use shared::llm::CannedSqlGenerator;
use shared::models::ResultSet;
use shared::storage::{InMemoryDatabase, PostgresDatabase};
use shared::tokio_postgres::NoTls;
use std::sync::Arc;

/// The statement the canned model answers with in the happy path.
pub const COUNT_CUSTOMERS: &str = "SELECT COUNT(*) FROM \"Customer\"";

/// A database with `Customer(id int, name text)` and `Invoice(id, total)`
/// that knows the answer to [`COUNT_CUSTOMERS`].
pub fn sample_database() -> InMemoryDatabase {
    InMemoryDatabase::new()
        .with_table("Customer", &[("id", "integer"), ("name", "text")])
        .with_table("Invoice", &[("id", "integer"), ("total", "numeric")])
        .with_result(
            COUNT_CUSTOMERS,
            ResultSet::new(vec!["count".to_string()]).with_row(vec![json!(3)]),
        )
}

/// Handles to the test doubles behind a router.
pub struct TestApp {
    /// The router under test.
    pub router: Router,
    /// The database double.
    pub database: Arc<InMemoryDatabase>,
    /// The model double.
    pub generator: Arc<CannedSqlGenerator>,
}

/// Creates a test router over the given doubles.
pub fn test_app(database: InMemoryDatabase, generator: CannedSqlGenerator) -> TestApp {
    let database = Arc::new(database);
    let generator = Arc::new(generator);
    let state = AppState::new(database.clone(), generator.clone());

    TestApp {
        router: create_router(state),
        database,
        generator,
    }
}

/// Creates a test router whose model always answers with `raw`.
pub fn app_replying(raw: &str) -> TestApp {
    test_app(sample_database(), CannedSqlGenerator::replying(raw))
}

/// Helper to make a POST request with JSON body.
pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Helper to make a GET request.
pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Asks a question through `/chat-with-data`.
pub async fn ask(app: Router, question: &str) -> (StatusCode, Value) {
    post_json(app, "/chat-with-data", json!({ "query": question })).await
}

/// Connection settings for the live database tests, from `POSTGRES_*`.
pub fn postgres_config() -> DatabaseConfig {
    DatabaseConfig::from_env().unwrap()
}

/// Creates a handle to the live database.
pub fn postgres_database() -> PostgresDatabase {
    postgres_config().connect_lazy()
}

/// Creates a test router over the live database and a canned model.
pub fn test_app_with_postgres(generator: CannedSqlGenerator) -> Router {
    create_router(AppState::new(
        Arc::new(postgres_database()),
        Arc::new(generator),
    ))
}

/// Runs setup statements against the live database.
pub async fn run_sql(statements: &str) {
    let (client, connection) = postgres_config()
        .to_pg_config()
        .connect(NoTls)
        .await
        .unwrap();
    tokio::spawn(async move {
        let _ = connection.await;
    });
    client.batch_execute(statements).await.unwrap();
}
