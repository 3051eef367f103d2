//! Data models for the chat-with-data service.
//!
//! This module contains the schema metadata, the inbound question, and the
//! query result structures.

pub mod chat;
pub mod result_set;
pub mod schema;

pub use chat::{ChatRequest, ChatValidationError};
pub use result_set::{Record, ResultSet};
pub use schema::{build_schema_text, table_names, ColumnDescriptor, EMPTY_SCHEMA_TEXT};
