//! Cleanup of raw model output.

const FENCE: &str = "```";

/// Language tags models put after the opening fence.
const LANGUAGE_TAGS: [&str; 5] = ["sql", "postgresql", "postgres", "pgsql", "psql"];

/// Removes a markdown code fence around model output.
///
/// The text is trimmed. When it opens with a triple-backtick fence, the
/// opening fence is dropped, along with a SQL language tag written on the
/// same line (such as `sql`) and a closing fence if one is present. Any other
/// text on the opening line is kept as part of the statement. Text without a
/// fence is returned trimmed and otherwise untouched.
///
/// # Example
///
/// ```
/// use shared::query::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```sql\nSELECT 1\n```"), "SELECT 1");
/// assert_eq!(strip_code_fence("SELECT 1"), "SELECT 1");
/// ```
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    let Some(inner) = text.strip_prefix(FENCE) else {
        return text;
    };
    let inner = inner.strip_suffix(FENCE).unwrap_or(inner);

    let inner = match inner.split_once('\n') {
        Some((tag, rest)) if is_language_tag(tag) => rest,
        _ => inner,
    };
    inner.trim()
}

fn is_language_tag(line: &str) -> bool {
    let tag = line.trim();
    tag.is_empty() || LANGUAGE_TAGS.iter().any(|known| tag.eq_ignore_ascii_case(known))
}
