//! Database schema model.
//!
//! Defines column metadata as read from the database catalog and the
//! compact textual rendering handed to the language model.

use serde::{Deserialize, Serialize};

/// Text returned by [`build_schema_text`] when the catalog has no columns.
pub const EMPTY_SCHEMA_TEXT: &str = "No tables found in public schema.";

/// A single column as listed in the database catalog.
///
/// Descriptors are produced fresh for every request, ordered by table name
/// and then by the column's position in its table.
///
/// # Example
///
/// ```
/// use shared::models::ColumnDescriptor;
///
/// let column = ColumnDescriptor::new("Customer", "id", "integer");
/// assert_eq!(column.table_name, "Customer");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Name of the table the column belongs to.
    pub table_name: String,

    /// Name of the column.
    pub column_name: String,

    /// Declared data type, as reported by the catalog.
    pub data_type: String,
}

impl ColumnDescriptor {
    /// Creates a new column descriptor.
    #[must_use]
    pub fn new(
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            column_name: column_name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Renders column descriptors as one `Table <name> (<col> <type>, ...)` line
/// per table.
///
/// Tables appear in the order they are first seen, so identical input always
/// yields identical text. Columns of a table keep their relative order even if
/// the descriptors of different tables are interleaved.
///
/// # Example
///
/// ```
/// use shared::models::{build_schema_text, ColumnDescriptor};
///
/// let text = build_schema_text(&[
///     ColumnDescriptor::new("Customer", "id", "integer"),
///     ColumnDescriptor::new("Customer", "name", "text"),
/// ]);
/// assert_eq!(text, "Table Customer (id integer, name text)");
/// ```
#[must_use]
pub fn build_schema_text(descriptors: &[ColumnDescriptor]) -> String {
    if descriptors.is_empty() {
        return EMPTY_SCHEMA_TEXT.to_string();
    }

    table_names(descriptors)
        .iter()
        .map(|table| {
            let columns = descriptors
                .iter()
                .filter(|d| &d.table_name == table)
                .map(|d| format!("{} {}", d.column_name, d.data_type))
                .collect::<Vec<_>>()
                .join(", ");
            format!("Table {table} ({columns})")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns the distinct table names in first-seen order.
#[must_use]
pub fn table_names(descriptors: &[ColumnDescriptor]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for descriptor in descriptors {
        if !names.contains(&descriptor.table_name) {
            names.push(descriptor.table_name.clone());
        }
    }
    names
}
