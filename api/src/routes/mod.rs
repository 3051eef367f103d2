//! API route definitions.
//!
//! This module organizes all HTTP routes for the chat-with-data API server.

mod chat;
mod health;
mod schema;

pub use chat::{answer, chat_routes, ChatAnswer, ChatRejection, ChatResponse, LlmFailure};
pub use health::health_routes;
pub use schema::{schema_routes, SchemaResponse};
