//! Database trait and in-memory implementation.
//!
//! Provides the `Database` trait for the two reads the service performs,
//! schema introspection and query execution, and an `InMemoryDatabase`
//! implementation for development and testing.

use crate::models::{ColumnDescriptor, ResultSet};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DatabaseError {
    /// The connection could not be established.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The statement failed to prepare or execute.
    #[error("{0}")]
    Query(String),

    /// Failed to acquire lock on the store.
    #[error("Failed to acquire lock on database")]
    LockError,
}

/// Trait for the read-only database the service talks to.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Database: Send + Sync {
    /// Lists every column of the public schema, ordered by table name and
    /// then column position.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails or the catalog query errors.
    async fn fetch_schema(&self) -> Result<Vec<ColumnDescriptor>, DatabaseError>;

    /// Runs a statement and materializes its full result.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails or the statement errors.
    async fn execute(&self, sql: &str) -> Result<ResultSet, DatabaseError>;
}

/// In-memory database implementation.
///
/// Serves a fixed list of columns as its schema and answers statements from
/// a table of canned results keyed by the exact SQL text. Unknown statements
/// fail the way a real database would reject an unknown relation. Every
/// executed statement is recorded.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use shared::models::ResultSet;
/// use shared::storage::{Database, InMemoryDatabase};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let db = InMemoryDatabase::new()
///     .with_table("Customer", &[("id", "integer"), ("name", "text")])
///     .with_result(
///         "SELECT 1",
///         ResultSet::new(vec!["?column?".to_string()]).with_row(vec![json!(1)]),
///     );
///
/// assert_eq!(db.fetch_schema().await.unwrap().len(), 2);
/// assert_eq!(db.execute("SELECT 1").await.unwrap().row_count(), 1);
/// assert_eq!(db.executed().unwrap(), vec!["SELECT 1".to_string()]);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    columns: Vec<ColumnDescriptor>,
    results: HashMap<String, ResultSet>,
    unavailable: Option<String>,
    executed: RwLock<Vec<String>>,
}

impl InMemoryDatabase {
    /// Creates a new empty in-memory database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a database whose every call fails with a connection error.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            unavailable: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Adds a table with the given `(column, type)` pairs to the schema.
    #[must_use]
    pub fn with_table(mut self, table: &str, columns: &[(&str, &str)]) -> Self {
        self.columns.extend(
            columns
                .iter()
                .map(|(name, data_type)| ColumnDescriptor::new(table, *name, *data_type)),
        );
        self
    }

    /// Registers the result returned for an exact statement text.
    #[must_use]
    pub fn with_result(mut self, sql: impl Into<String>, result: ResultSet) -> Self {
        self.results.insert(sql.into(), result);
        self
    }

    /// Returns the statements executed so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn executed(&self) -> Result<Vec<String>, DatabaseError> {
        let executed = self.executed.read().map_err(|_| DatabaseError::LockError)?;
        Ok(executed.clone())
    }

    fn check_available(&self) -> Result<(), DatabaseError> {
        match &self.unavailable {
            Some(reason) => Err(DatabaseError::Connection(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    async fn fetch_schema(&self) -> Result<Vec<ColumnDescriptor>, DatabaseError> {
        self.check_available()?;

        let mut columns = self.columns.clone();
        // Stable sort keeps declaration order within a table.
        columns.sort_by(|a, b| a.table_name.cmp(&b.table_name));
        Ok(columns)
    }

    async fn execute(&self, sql: &str) -> Result<ResultSet, DatabaseError> {
        self.check_available()?;

        self.executed
            .write()
            .map_err(|_| DatabaseError::LockError)?
            .push(sql.to_string());

        self.results.get(sql).cloned().ok_or_else(|| {
            DatabaseError::Query(format!("no result registered for statement: {sql}"))
        })
    }
}
