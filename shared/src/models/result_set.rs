//! Query result model.
//!
//! A [`ResultSet`] holds the materialized output of one query. Rows serialize
//! as records keyed by column name, in column order.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

/// Columns and rows returned by a query.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use shared::models::ResultSet;
///
/// let mut result = ResultSet::new(vec!["count".to_string()]);
/// result.push_row(vec![json!(3)]);
///
/// assert_eq!(result.row_count(), 1);
/// assert_eq!(
///     serde_json::to_value(result.records()).unwrap(),
///     json!([{"count": 3}])
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ResultSet {
    /// Creates an empty result set with the given column names.
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row. Values are matched to columns by position.
    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    /// Builder variant of [`ResultSet::push_row`].
    #[must_use]
    pub fn with_row(mut self, row: Vec<Value>) -> Self {
        self.push_row(row);
        self
    }

    /// Column names in result order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Raw row values.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows as column-keyed records.
    #[must_use]
    pub fn records(&self) -> Vec<Record<'_>> {
        self.rows
            .iter()
            .map(|values| Record {
                columns: &self.columns,
                values,
            })
            .collect()
    }
}

/// One row, serialized as a JSON object keyed by column name.
///
/// Keys are written in column order. Missing trailing values are written as
/// `null`.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl Record<'_> {
    /// Looks up a value by column name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
    }
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (i, column) in self.columns.iter().enumerate() {
            map.serialize_entry(column, self.values.get(i).unwrap_or(&Value::Null))?;
        }
        map.end()
    }
}
