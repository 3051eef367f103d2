//! Integration tests for the chat-with-data API.
//!
//! These tests drive the complete router, from HTTP request to JSON body,
//! with an in-memory database and a canned model standing in for the
//! external services. Tests in `postgres_tests` need a running `PostgreSQL`
//! instance (see `POSTGRES_*`) and are ignored by default.
//! Run with: `cargo test -- --ignored`

mod common;

mod health_tests;
mod postgres_tests;
mod schema_tests;
