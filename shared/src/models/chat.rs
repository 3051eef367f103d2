//! Chat request model.
//!
//! Defines the inbound question payload and its validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

const BLANK: &str = "blank";

/// A natural-language question about the data.
///
/// # Example
///
/// ```
/// use shared::models::ChatRequest;
///
/// let request = ChatRequest::new("  how many customers?  ");
/// assert_eq!(request.question().unwrap(), "how many customers?");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    /// The question, in plain language.
    #[validate(custom(function = "validate_not_blank"))]
    pub query: String,
}

/// Errors that can occur during chat request validation.
#[derive(Debug, Error)]
pub enum ChatValidationError {
    /// The question is empty once surrounding whitespace is removed.
    #[error("query is required")]
    EmptyQuery,

    /// Validation failed with details.
    #[error("Validation failed: {0}")]
    ValidationError(ValidationErrors),
}

impl From<ValidationErrors> for ChatValidationError {
    fn from(errors: ValidationErrors) -> Self {
        let blank = errors
            .field_errors()
            .get("query")
            .is_some_and(|errs| errs.iter().any(|e| e.code == BLANK));
        if blank {
            Self::EmptyQuery
        } else {
            Self::ValidationError(errors)
        }
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(BLANK));
    }
    Ok(())
}

impl ChatRequest {
    /// Creates a new chat request.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// Returns the trimmed question.
    ///
    /// # Errors
    ///
    /// Returns [`ChatValidationError::EmptyQuery`] if the question is empty
    /// or whitespace only.
    pub fn question(&self) -> Result<&str, ChatValidationError> {
        self.validate()?;
        Ok(self.query.trim())
    }
}
