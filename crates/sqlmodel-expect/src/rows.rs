//! Mock-driver row sets.

use std::sync::Arc;

use serde::Serialize;
use sqlmodel_core::{ColumnInfo, Error, ExpectationError, ExpectationErrorKind, Result, Row, Value};

/// An ordered column list plus zero or more rows of cells.
///
/// Every row holds exactly one value per column; [`RowSet::add_row`]
/// rejects anything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RowSet {
    /// Create an empty row set with the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, in insertion order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the set has columns but no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append one row.
    pub fn add_row(&mut self, values: Vec<Value>) -> Result<&mut Self> {
        if values.len() != self.columns.len() {
            return Err(Error::Expectation(ExpectationError::new(
                ExpectationErrorKind::RowWidth,
                format!(
                    "row has {} values but the row set has {} columns ({})",
                    values.len(),
                    self.columns.len(),
                    self.columns.join(", ")
                ),
            )));
        }
        self.rows.push(values);
        Ok(self)
    }

    /// Builder form of [`RowSet::add_row`].
    pub fn with_row(mut self, values: Vec<Value>) -> Result<Self> {
        self.add_row(values)?;
        Ok(self)
    }

    /// Move every row of `other` onto the end of this set.
    pub fn append(&mut self, other: RowSet) -> Result<&mut Self> {
        for row in other.rows {
            self.add_row(row)?;
        }
        Ok(self)
    }

    /// Materialize the set as result rows sharing one column index.
    pub fn to_rows(&self) -> Vec<Row> {
        let columns = Arc::new(ColumnInfo::new(self.columns.clone()));
        self.rows
            .iter()
            .map(|values| Row::with_columns(Arc::clone(&columns), values.clone()))
            .collect()
    }
}
