//! Language model abstraction.
//!
//! The model is an untrusted oracle: it turns a question and a schema listing
//! into candidate SQL text, which callers must still run through
//! [`crate::query::check`].

use crate::query::strip_code_fence;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

/// Errors that can occur while asking the model for SQL.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompletionError {
    /// The completion API answered with a non-success status.
    #[error("Completion API error: {status} {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Response body as returned.
        body: String,
    },

    /// The response did not contain the expected text.
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    /// The request could not be sent or timed out.
    #[error("Completion request failed: {0}")]
    Transport(String),
}

/// Trait for SQL generation backends.
#[async_trait]
pub trait SqlGenerator: Send + Sync {
    /// Generates SQL text answering `question` against `schema_text`.
    ///
    /// The returned text has code fences removed but is otherwise unchecked.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or answers with no text.
    async fn generate_sql(&self, question: &str, schema_text: &str)
        -> Result<String, CompletionError>;
}

/// Generator that replies with a fixed answer.
///
/// The reply is treated as raw model output, so code fences are stripped the
/// same way the HTTP client strips them.
///
/// # Example
///
/// ```
/// use shared::llm::{CannedSqlGenerator, SqlGenerator};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let generator = CannedSqlGenerator::replying("```sql\nSELECT 1\n```");
/// let sql = generator.generate_sql("anything", "Table t (id integer)").await.unwrap();
/// assert_eq!(sql, "SELECT 1");
/// assert_eq!(generator.calls(), 1);
/// # }
/// ```
#[derive(Debug)]
pub struct CannedSqlGenerator {
    reply: Result<String, CompletionError>,
    calls: AtomicUsize,
}

impl CannedSqlGenerator {
    /// Creates a generator that always answers with `raw`.
    #[must_use]
    pub fn replying(raw: impl Into<String>) -> Self {
        Self {
            reply: Ok(raw.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a generator that always fails with `error`.
    #[must_use]
    pub fn failing(error: CompletionError) -> Self {
        Self {
            reply: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times the generator has been called.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SqlGenerator for CannedSqlGenerator {
    async fn generate_sql(
        &self,
        _question: &str,
        _schema_text: &str,
    ) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .as_deref()
            .map(|raw| strip_code_fence(raw).to_string())
            .map_err(Clone::clone)
    }
}
