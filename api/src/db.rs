//! Database connection module for `PostgreSQL`.
//!
//! Loads connection settings from environment variables and turns them into
//! the driver configuration used by [`PostgresDatabase`]. Connections are
//! opened per call; there is no pool.

use crate::config::{port_from_env, ConfigError};
use shared::storage::PostgresDatabase;
use shared::tokio_postgres;

/// Database configuration loaded from environment variables.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Username for authentication.
    pub user: String,
    /// Password for authentication.
    pub password: String,
    /// Database name to use.
    pub database: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

impl DatabaseConfig {
    /// Load database configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `POSTGRES_HOST`: Server host (default: "localhost")
    /// - `POSTGRES_PORT`: Server port (default: 5432)
    /// - `POSTGRES_USER`: Database user (default: "postgres")
    /// - `POSTGRES_PASSWORD`: Database password (default: "postgres")
    /// - `POSTGRES_DB`: Database name (default: "`analytics_db`")
    ///
    /// # Errors
    ///
    /// Returns an error if `POSTGRES_PORT` is set but is not a valid port.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: std::env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: port_from_env("POSTGRES_PORT", 5432)?,
            user: std::env::var("POSTGRES_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: std::env::var("POSTGRES_PASSWORD")
                .unwrap_or_else(|_| "postgres".to_string()),
            database: std::env::var("POSTGRES_DB").unwrap_or_else(|_| "analytics_db".to_string()),
        })
    }

    /// Builds the driver connection settings.
    #[must_use]
    pub fn to_pg_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .user(&self.user)
            .password(&self.password)
            .dbname(&self.database);
        config
    }

    /// Creates the database handle for these settings.
    #[must_use]
    pub fn connect_lazy(&self) -> PostgresDatabase {
        PostgresDatabase::new(self.to_pg_config())
    }
}
