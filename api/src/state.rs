//! Application state module.
//!
//! Defines the shared application state that is passed to route handlers.

use shared::llm::SqlGenerator;
use shared::storage::Database;
use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// Holds the database and the SQL generator. Both are immutable and shared,
/// so handlers never coordinate with each other.
#[derive(Clone)]
pub struct AppState {
    /// The database queried for schema and results.
    database: Arc<dyn Database>,
    /// The model backend that writes SQL.
    generator: Arc<dyn SqlGenerator>,
}

impl AppState {
    /// Creates a new application state with the given backends.
    pub fn new(database: Arc<dyn Database>, generator: Arc<dyn SqlGenerator>) -> Self {
        Self {
            database,
            generator,
        }
    }

    /// Returns a reference to the database.
    #[must_use]
    pub fn database(&self) -> &dyn Database {
        self.database.as_ref()
    }

    /// Returns a reference to the SQL generator.
    #[must_use]
    pub fn generator(&self) -> &dyn SqlGenerator {
        self.generator.as_ref()
    }
}
