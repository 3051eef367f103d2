//! `PostgreSQL` implementation of the `Database` trait.
//!
//! Each call opens its own connection and drops it when done; there is no
//! pool. Only the metadata catalog and caller-supplied statements are read.

use super::database::{Database, DatabaseError};
use super::pg_value::column_value;
use crate::models::{ColumnDescriptor, ResultSet};
use async_trait::async_trait;
use tokio_postgres::{Client, Config, NoTls};

const SCHEMA_QUERY: &str = "
    SELECT table_name::text, column_name::text, data_type::text
    FROM information_schema.columns
    WHERE table_schema = 'public'
    ORDER BY table_name, ordinal_position";

/// `PostgreSQL`-backed database.
#[derive(Debug, Clone)]
pub struct PostgresDatabase {
    config: Config,
}

impl PostgresDatabase {
    /// Creates a new database handle with the given connection settings.
    ///
    /// No connection is opened until the first call.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    async fn connect(&self) -> Result<Client, DatabaseError> {
        let (client, connection) = self
            .config
            .connect(NoTls)
            .await
            .map_err(|e| DatabaseError::Connection(describe(&e)))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "Postgres connection error");
            }
        });

        Ok(client)
    }
}

#[async_trait]
impl Database for PostgresDatabase {
    async fn fetch_schema(&self) -> Result<Vec<ColumnDescriptor>, DatabaseError> {
        let client = self.connect().await?;

        let rows = client
            .query(SCHEMA_QUERY, &[])
            .await
            .map_err(|e| DatabaseError::Query(describe(&e)))?;

        rows.iter()
            .map(|row| -> Result<ColumnDescriptor, tokio_postgres::Error> {
                Ok(ColumnDescriptor {
                    table_name: row.try_get(0)?,
                    column_name: row.try_get(1)?,
                    data_type: row.try_get(2)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DatabaseError::Query(describe(&e)))
    }

    async fn execute(&self, sql: &str) -> Result<ResultSet, DatabaseError> {
        let client = self.connect().await?;

        // Preparing first gives column names even when no rows come back.
        let statement = client
            .prepare(sql)
            .await
            .map_err(|e| DatabaseError::Query(describe(&e)))?;
        let rows = client
            .query(&statement, &[])
            .await
            .map_err(|e| DatabaseError::Query(describe(&e)))?;

        let columns = statement
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        let mut result = ResultSet::new(columns);

        for row in &rows {
            let values = (0..row.len())
                .map(|i| column_value(row, i))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| DatabaseError::Query(describe(&e)))?;
            result.push_row(values);
        }

        tracing::debug!(rows = result.row_count(), "Statement executed");
        Ok(result)
    }
}

/// Renders a driver error with the server's message when there is one.
///
/// The driver's own `Display` only says "db error" for server-side failures.
fn describe(error: &tokio_postgres::Error) -> String {
    match error.as_db_error() {
        Some(db) => format!("{}: {}", db.severity(), db.message()),
        None => error.to_string(),
    }
}
