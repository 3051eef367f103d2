//! Storage traits and implementations.
//!
//! This module provides the read-only database abstraction the service runs
//! against. The `Database` trait defines the interface, allowing different
//! implementations (in-memory, `PostgreSQL`).

pub mod database;
mod pg_value;
pub mod postgres;

pub use database::{Database, DatabaseError, InMemoryDatabase};
pub use postgres::PostgresDatabase;
