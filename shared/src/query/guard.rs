//! Textual safety checks applied to generated SQL before execution.
//!
//! These checks are heuristics over the raw text, not a parser. A candidate
//! that starts with `SELECT` and mentions a known table passes even if it
//! stacks further statements after a semicolon or hides them in comments.

use super::prompt::UNABLE_TO_ANSWER;
use std::fmt;

/// Outcome of checking a candidate statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardResult {
    /// The model reported that the question cannot be answered.
    Unanswerable,
    /// The candidate does not start with `SELECT`.
    NotSelect,
    /// The candidate mentions none of the known tables.
    NoKnownTable,
    /// The candidate passed every check.
    Accepted,
}

impl fmt::Display for GuardResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unanswerable => write!(f, "unanswerable"),
            Self::NotSelect => write!(f, "not_select"),
            Self::NoKnownTable => write!(f, "no_known_table"),
            Self::Accepted => write!(f, "accepted"),
        }
    }
}

/// Checks a generated statement against the known table names.
///
/// Checks run on the trimmed candidate in order: the unanswerable literal
/// (case-insensitive, exact), a case-insensitive `select` prefix, then a
/// case-insensitive substring match for at least one known table.
///
/// # Example
///
/// ```
/// use shared::query::{check, GuardResult};
///
/// let tables = ["Customer".to_string()];
/// assert_eq!(check("SELECT * FROM \"Customer\"", &tables), GuardResult::Accepted);
/// assert_eq!(check("DELETE FROM \"Customer\"", &tables), GuardResult::NotSelect);
/// ```
#[must_use]
pub fn check<S: AsRef<str>>(candidate: &str, known_tables: &[S]) -> GuardResult {
    let candidate = candidate.trim();

    if candidate.eq_ignore_ascii_case(UNABLE_TO_ANSWER) {
        return GuardResult::Unanswerable;
    }

    let lowered = candidate.to_lowercase();
    if !lowered.starts_with("select") {
        return GuardResult::NotSelect;
    }

    let mentions_known_table = known_tables
        .iter()
        .any(|table| lowered.contains(&table.as_ref().to_lowercase()));
    if !mentions_known_table {
        return GuardResult::NoKnownTable;
    }

    GuardResult::Accepted
}
