//! Chat-with-data endpoint.
//!
//! Turns a natural-language question into SQL via the model, checks the
//! statement, runs it, and returns the rows.
//!
//! Every outcome of the pipeline, including failures, is answered with HTTP
//! 200 and an error-shaped body. Clients must inspect the body, not the
//! status code. Only a request body that cannot be decoded at all is
//! rejected with a non-200 status.

use super::schema::schema_failure;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Serialize, Serializer};
use shared::models::{build_schema_text, table_names, ChatRequest, ResultSet};
use shared::query::{check, GuardResult};

/// Successful answer to a question.
#[derive(Debug, Serialize)]
pub struct ChatAnswer {
    /// The trimmed question.
    pub query: String,
    /// The statement that was executed.
    pub generated_sql: String,
    /// Number of rows returned.
    pub rows: usize,
    /// Column names in result order.
    pub columns: Vec<String>,
    /// Rows as column-keyed records.
    #[serde(serialize_with = "serialize_records")]
    pub results: ResultSet,
}

fn serialize_records<S: Serializer>(result: &ResultSet, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(result.records())
}

/// A question that could not be answered.
#[derive(Debug, Serialize)]
pub struct ChatRejection {
    /// What went wrong.
    pub error: String,
    /// The statement the model produced, when there was one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_sql: Option<String>,
    /// Tables the model was allowed to use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_tables: Option<Vec<String>>,
}

impl ChatRejection {
    /// Creates a rejection with only an error message.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            generated_sql: None,
            available_tables: None,
        }
    }

    /// Attaches the generated statement.
    #[must_use]
    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.generated_sql = Some(sql.into());
        self
    }

    /// Attaches the known tables.
    #[must_use]
    pub fn with_tables(mut self, tables: Vec<String>) -> Self {
        self.available_tables = Some(tables);
        self
    }
}

/// The completion API failed.
#[derive(Debug, Serialize)]
pub struct LlmFailure {
    /// Failure description, prefixed with `LLM error:`.
    pub detail: String,
}

/// Body of every `/chat-with-data` response.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ChatResponse {
    /// Rows for the question.
    Answer(ChatAnswer),
    /// Validation, guard, or database failure.
    Rejected(ChatRejection),
    /// Completion API failure.
    LlmFailure(LlmFailure),
}

/// Body for requests that could not be decoded.
#[derive(Debug, Serialize)]
pub struct RequestRejection {
    /// Decoder message.
    pub detail: String,
}

/// Creates the chat routes with application state.
pub fn chat_routes(state: AppState) -> Router {
    Router::new()
        .route("/chat-with-data", post(chat_with_data))
        .with_state(state)
}

/// Handler for chat requests.
async fn chat_with_data(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<RequestRejection>)> {
    let Json(request) = payload.map_err(|rejection| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(RequestRejection {
                detail: rejection.body_text(),
            }),
        )
    })?;

    Ok(Json(answer(&state, &request).await))
}

/// Runs the question-to-rows pipeline for one request.
///
/// Steps run in order and the first failure ends the request: question
/// validation, schema fetch, SQL generation, guard, execution.
pub async fn answer(state: &AppState, request: &ChatRequest) -> ChatResponse {
    let question = match request.question() {
        Ok(question) => question,
        Err(e) => return ChatResponse::Rejected(ChatRejection::new(e.to_string())),
    };

    let columns = match state.database().fetch_schema().await {
        Ok(columns) => columns,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch schema");
            return ChatResponse::Rejected(ChatRejection::new(schema_failure(&e)));
        }
    };
    let schema_text = build_schema_text(&columns);
    let tables = table_names(&columns);

    let sql = match state.generator().generate_sql(question, &schema_text).await {
        Ok(sql) => sql,
        Err(e) => {
            tracing::warn!(error = %e, "SQL generation failed");
            return ChatResponse::LlmFailure(LlmFailure {
                detail: format!("LLM error: {e}"),
            });
        }
    };
    let sql = sql.trim().to_string();

    let verdict = check(&sql, &tables);
    tracing::debug!(%verdict, sql = %sql, "Checked generated SQL");

    let rejection = match verdict {
        GuardResult::Accepted => None,
        GuardResult::Unanswerable => Some(
            ChatRejection::new("LLM could not form a SQL query using the available tables")
                .with_tables(tables.clone()),
        ),
        GuardResult::NotSelect => Some(
            ChatRejection::new("Only SELECT queries are allowed.").with_sql(sql.clone()),
        ),
        GuardResult::NoKnownTable => Some(
            ChatRejection::new("Generated SQL does not reference any available tables.")
                .with_sql(sql.clone())
                .with_tables(tables.clone()),
        ),
    };
    if let Some(rejection) = rejection {
        tracing::warn!(%verdict, "Generated SQL rejected");
        return ChatResponse::Rejected(rejection);
    }

    match state.database().execute(&sql).await {
        Ok(result) => {
            tracing::debug!(rows = result.row_count(), "Question answered");
            ChatResponse::Answer(ChatAnswer {
                query: question.to_string(),
                generated_sql: sql,
                rows: result.row_count(),
                columns: result.columns().to_vec(),
                results: result,
            })
        }
        Err(e) => {
            tracing::warn!(error = %e, "Generated SQL failed to execute");
            ChatResponse::Rejected(
                ChatRejection::new(format!("Execution failed: {e}"))
                    .with_sql(sql)
                    .with_tables(tables),
            )
        }
    }
}
