//! Server configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.

use std::net::SocketAddr;
use std::num::ParseIntError;
use thiserror::Error;

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The completion API key is not set.
    #[error("Missing {0} in environment")]
    MissingApiKey(&'static str),

    /// A port variable is set but is not a valid port number.
    #[error("Invalid port in {var}: {source}")]
    InvalidPort {
        /// The offending variable.
        var: &'static str,
        /// Parse failure.
        source: ParseIntError,
    },
}

/// Reads a port from `var`, falling back to `default` when unset.
pub(crate) fn port_from_env(var: &'static str, default: u16) -> Result<u16, ConfigError> {
    std::env::var(var)
        .ok()
        .map(|p| p.parse::<u16>())
        .transpose()
        .map_err(|source| ConfigError::InvalidPort { var, source })
        .map(|port| port.unwrap_or(default))
}

/// Server configuration.
///
/// Configuration values can be set via environment variables:
/// - `CHATDATA_HOST`: The host address to bind to (default: "0.0.0.0")
/// - `CHATDATA_PORT`: The port to listen on (default: 8000)
#[derive(Debug, Clone)]
pub struct Config {
    /// The host address to bind to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
}

impl Config {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `CHATDATA_PORT` is set but cannot be parsed as a valid port number
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("CHATDATA_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = port_from_env("CHATDATA_PORT", 8000)?;

        Ok(Self { host, port })
    }

    /// Returns the socket address for binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the host and port do not form a valid socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}
