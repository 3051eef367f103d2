//! Prompt template for SQL generation.

/// Literal the model is told to answer with when the question cannot be
/// expressed against the listed tables.
pub const UNABLE_TO_ANSWER: &str = "UNABLE_TO_ANSWER";

/// System instruction sent alongside every prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful SQL assistant.";

/// Embeds the schema listing and the question into the generation prompt.
///
/// The template tells the model that identifiers are case-sensitive and must
/// be double-quoted, that only the listed tables and columns exist, that the
/// answer must be a single bare `SELECT` statement, and that an unanswerable
/// question gets exactly [`UNABLE_TO_ANSWER`].
///
/// # Example
///
/// ```
/// use shared::query::build_prompt;
///
/// let prompt = build_prompt("how many customers?", "Table Customer (id integer)");
/// assert!(prompt.contains("Table Customer (id integer)"));
/// assert!(prompt.contains("how many customers?"));
/// ```
#[must_use]
pub fn build_prompt(question: &str, schema_text: &str) -> String {
    format!(
        r#"
You are an expert PostgreSQL SQL generator.

IMPORTANT:
- The database uses *case-sensitive* table and column names.
- Therefore, **always wrap every table name and column name in double quotes** ("TableName", "columnName").
- Only use the following tables/columns exactly as shown.
- Do NOT invent any new tables or columns.
- Always return a valid PostgreSQL SELECT query (no markdown, no explanations).

Available tables and columns:
{schema_text}

User question:
{question}

Rules:
- Only return a single SELECT statement.
- Use double quotes for all identifiers.
- Do not use markdown, comments, or extra formatting.
- If the query cannot be answered, return exactly: {UNABLE_TO_ANSWER}
"#
    )
}
