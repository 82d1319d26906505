//! In-memory tabular datasets
//!
//! A [`Dataset`] is an ordered list of rows over a fixed, ordered set of
//! uniquely named columns. Nothing about the schema is declared up front:
//! the columns are whatever the source file's header says, and it is the
//! job of the contract registry to decide whether that is acceptable.

pub mod value;

pub use value::Value;

use std::collections::HashSet;

/// Ordered rows over uniquely named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Create an empty dataset with the given columns
    ///
    /// Returns the first duplicated name as the error.
    pub fn new<I, S>(columns: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(column.clone());
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Append a row; short rows are padded with nulls, long rows truncated
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Look up a single cell by row index and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Iterate over every value of a column, or `None` if the column is absent
    pub fn column_values(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Set a column to the same value on every row
    ///
    /// An existing column is overwritten in place; otherwise the column is
    /// appended at the end.
    pub fn set_column(&mut self, name: &str, value: Value) {
        match self.column_index(name) {
            Some(idx) => {
                for row in &mut self.rows {
                    row[idx] = value.clone();
                }
            }
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(value.clone());
                }
            }
        }
    }

    /// Build a dataset from string literals, inferring cell types
    ///
    /// Mostly useful for tests and small fixtures.
    pub fn from_literals(columns: &[&str], rows: &[&[&str]]) -> Result<Self, String> {
        let mut dataset = Self::new(columns.iter().copied())?;
        for row in rows {
            dataset.push_row(row.iter().map(|cell| Value::parse(cell)).collect());
        }
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_duplicate_columns() {
        let err = Dataset::new(["store_id", "region", "store_id"]).unwrap_err();
        assert_eq!(err, "store_id");
    }

    #[test]
    fn test_push_row_pads_short_rows() {
        let mut ds = Dataset::new(["a", "b", "c"]).unwrap();
        ds.push_row(vec![Value::Integer(1)]);
        assert_eq!(ds.get(0, "c"), Some(&Value::Null));
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_column_values() {
        let ds = Dataset::from_literals(
            &["store_id", "total_sales"],
            &[&["1", "1000"], &["2", "-500"], &["3", "2000"]],
        )
        .unwrap();

        let sales: Vec<_> = ds.column_values("total_sales").unwrap().cloned().collect();
        assert_eq!(
            sales,
            vec![Value::Integer(1000), Value::Integer(-500), Value::Integer(2000)]
        );
        assert!(ds.column_values("discount_pct").is_none());
    }

    #[test]
    fn test_set_column_appends_then_overwrites() {
        let mut ds = Dataset::from_literals(&["store_id"], &[&["1"], &["2"]]).unwrap();

        ds.set_column("_batch_id", Value::from("20240101_000000"));
        assert_eq!(ds.columns(), &["store_id", "_batch_id"]);

        ds.set_column("_batch_id", Value::from("20240102_000000"));
        assert_eq!(ds.columns().len(), 2);
        assert_eq!(ds.get(1, "_batch_id"), Some(&Value::from("20240102_000000")));
    }
}
