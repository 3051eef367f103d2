//! Schema inspection endpoint.
//!
//! Returns the schema listing exactly as it would be handed to the model, so
//! callers can confirm which table and column names the server sees.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use shared::models::{build_schema_text, table_names};
use shared::storage::DatabaseError;

/// Response for schema inspection.
#[derive(Debug, Serialize, Deserialize)]
pub struct SchemaResponse {
    /// Table names in catalog order.
    pub tables: Vec<String>,
    /// The schema listing passed to the model.
    pub schema_text: String,
}

/// Error response for schema inspection.
#[derive(Debug, Serialize, Deserialize)]
pub struct SchemaError {
    /// Error message.
    pub error: String,
}

/// Message reported when the catalog cannot be read.
pub(crate) fn schema_failure(e: &DatabaseError) -> String {
    format!("Failed to load database schema: {e}")
}

/// Creates the schema routes with application state.
pub fn schema_routes(state: AppState) -> Router {
    Router::new()
        .route("/inspect-schema", get(inspect_schema))
        .with_state(state)
}

/// Handler for schema inspection.
async fn inspect_schema(
    State(state): State<AppState>,
) -> Result<Json<SchemaResponse>, (StatusCode, Json<SchemaError>)> {
    let columns = state.database().fetch_schema().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch schema");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SchemaError {
                error: schema_failure(&e),
            }),
        )
    })?;

    Ok(Json(SchemaResponse {
        tables: table_names(&columns),
        schema_text: build_schema_text(&columns),
    }))
}
