//! SQL generation support.
//!
//! This module provides the prompt template sent to the language model, the
//! cleanup of its raw answer, and the guard that decides whether a generated
//! statement may run.
//!
//! # Example
//!
//! ```
//! use shared::query::{build_prompt, check, strip_code_fence, GuardResult};
//!
//! let prompt = build_prompt("how many customers?", "Table Customer (id integer)");
//! assert!(prompt.contains("how many customers?"));
//!
//! let sql = strip_code_fence("```sql\nSELECT COUNT(*) FROM \"Customer\"\n```");
//! assert_eq!(check(sql, &["Customer"]), GuardResult::Accepted);
//! ```

pub mod fence;
pub mod guard;
pub mod prompt;

pub use fence::strip_code_fence;
pub use guard::{check, GuardResult};
pub use prompt::{build_prompt, SYSTEM_INSTRUCTION, UNABLE_TO_ANSWER};
