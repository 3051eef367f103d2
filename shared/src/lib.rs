//! Chat-with-data Shared Library
//!
//! This crate contains the types and pure logic behind the chat-with-data
//! service: turning catalog metadata into a schema listing, building the
//! generation prompt, cleaning and guarding generated SQL, and the storage
//! and language-model abstractions the server runs against.
//!
//! # Modules
//!
//! - [`models`] - Schema metadata, chat request, and query results
//! - [`query`] - Prompt template, fence stripping, and the SQL guard
//! - [`storage`] - Database trait and implementations
//! - [`llm`] - SQL generator trait and test double
//!
//! # Example
//!
//! ```
//! use shared::models::{build_schema_text, ColumnDescriptor};
//! use shared::query::{check, GuardResult};
//!
//! let schema = vec![
//!     ColumnDescriptor::new("Customer", "id", "integer"),
//!     ColumnDescriptor::new("Customer", "name", "text"),
//! ];
//! assert_eq!(build_schema_text(&schema), "Table Customer (id integer, name text)");
//! assert_eq!(check("DROP TABLE Customer", &["Customer"]), GuardResult::NotSelect);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod llm;
pub mod models;
pub mod query;
pub mod storage;

/// Re-export common dependencies for convenience.
pub use serde;
pub use serde_json;
pub use tokio_postgres;
