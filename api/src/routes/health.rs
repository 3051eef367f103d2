//! Liveness endpoints.
//!
//! Provides the root status payload and a health check for load balancers and
//! monitoring systems.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Root status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Fixed status line.
    pub status: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status (always "healthy" if reachable).
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Creates the liveness routes.
pub fn health_routes() -> Router {
    Router::new()
        .route("/", get(root_status))
        .route("/health", get(health_check))
}

/// Root handler.
async fn root_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Chat-with-data API running",
    })
}

/// Health check handler.
///
/// Returns a simple JSON response indicating the service is healthy. Neither
/// the database nor the completion API is contacted.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "chat-with-data-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}
