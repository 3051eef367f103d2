//! Chat-with-data API Server
//!
//! This crate provides the HTTP server that answers natural-language
//! questions about a `PostgreSQL` database. For each question it reads the
//! public schema, asks a hosted language model for a `SELECT` statement,
//! checks the statement, runs it, and returns the rows as JSON.
//!
//! # Architecture
//!
//! The API server is built on Axum and Tokio, providing:
//! - `POST /chat-with-data` for questions
//! - `GET /inspect-schema` to see the schema listing the model is given
//! - `GET /` and `GET /health` for liveness
//!
//! # Example
//!
//! ```no_run
//! use api::run_server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     run_server().await
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod completion;
mod config;
pub mod db;
mod routes;
mod state;

pub use completion::{CompletionClient, CompletionConfig};
pub use config::{Config, ConfigError};
pub use db::DatabaseConfig;
pub use routes::{answer, ChatAnswer, ChatRejection, ChatResponse, LlmFailure, SchemaResponse};
pub use state::AppState;

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Runs the chat-with-data API server.
///
/// This function loads server, database, and completion configuration from
/// environment variables and starts listening for incoming connections. It
/// handles graceful shutdown on SIGTERM/SIGINT signals.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment (including a missing API key)
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server() -> Result<()> {
    let config = Config::from_env()?;
    let database = DatabaseConfig::from_env()?;
    let completion = CompletionConfig::from_env()?;

    tracing::info!(
        db_host = %database.host,
        db_port = database.port,
        db_name = %database.database,
        model = %completion.model,
        "Loaded configuration"
    );

    let state = AppState::new(
        Arc::new(database.connect_lazy()),
        Arc::new(CompletionClient::new(completion).context("Failed to build HTTP client")?),
    );

    run_server_with_config(config, state).await
}

/// Runs the chat-with-data API server with the provided configuration and state.
///
/// This is useful for testing or when you want to provide configuration programmatically.
///
/// # Errors
///
/// Returns an error if:
/// - The configured host and port are not a valid socket address
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server_with_config(config: Config, state: AppState) -> Result<()> {
    let addr = config
        .socket_addr()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.port))?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Chat-with-data API server starting"
    );

    let app = create_router(state);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Creates the main application router with all routes and middleware.
///
/// This function is public to allow testing the router without starting a full server.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health_routes())
        .merge(routes::schema_routes(state.clone()))
        .merge(routes::chat_routes(state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
