//! Table / Column — missing-aware columnar tables with typed column metadata.
//!
//! Column metadata is attached at load time so downstream stages select
//! columns structurally (by year/month, by quarter label) instead of
//! pattern-matching on column-name text.

use crate::domain::quarter::QuarterLabel;
use std::fmt;
use thiserror::Error;

/// What a column *is*, independent of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMeta {
    /// Part of the row identity (e.g. `State`, `RegionName`).
    Key,
    /// One calendar month of observations (e.g. a `2008-09` header).
    Month { year: i32, month: u32 },
    /// One aggregated quarter of observations.
    Quarter(QuarterLabel),
    /// Anything else (untyped pass-through).
    Plain,
}

/// Column payload. Key columns carry text, observation columns carry
/// missing-aware numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Text(Vec<String>),
    Number(Vec<Option<f64>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.len(),
            ColumnData::Number(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named column with typed metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    meta: ColumnMeta,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, meta: ColumnMeta, data: ColumnData) -> Self {
        Self { name: name.into(), meta, data }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meta(&self) -> ColumnMeta {
        self.meta
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Numeric values, if this is a number column.
    pub fn numbers(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Number(v) => Some(v),
            ColumnData::Text(_) => None,
        }
    }

    /// Text values, if this is a text column.
    pub fn texts(&self) -> Option<&[String]> {
        match &self.data {
            ColumnData::Text(v) => Some(v),
            ColumnData::Number(_) => None,
        }
    }
}

/// Composite row key: the key-column values at one row position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey(pub Vec<String>);

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("duplicate column name: {0:?}")]
    DuplicateColumn(String),

    #[error("column {column:?} has {actual} rows, expected {expected}")]
    RowCountMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

/// An ordered collection of equal-length named columns.
///
/// Invariants (enforced at construction): column names are unique and every
/// column has the same row count. Row order is fixed for the table's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let expected = columns.first().map(Column::len).unwrap_or(0);
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == col.name) {
                return Err(TableError::DuplicateColumn(col.name.clone()));
            }
            if col.len() != expected {
                return Err(TableError::RowCountMismatch {
                    column: col.name.clone(),
                    expected,
                    actual: col.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns whose metadata satisfies a structural predicate.
    pub fn select(&self, pred: impl Fn(ColumnMeta) -> bool) -> Vec<&Column> {
        self.columns.iter().filter(|c| pred(c.meta)).collect()
    }

    /// The key columns, in table order.
    pub fn key_columns(&self) -> Vec<&Column> {
        self.select(|m| m == ColumnMeta::Key)
    }

    /// Composite key for one row, from the key columns in table order.
    pub fn row_key(&self, row: usize) -> RowKey {
        let parts = self
            .key_columns()
            .iter()
            .filter_map(|c| c.texts())
            .map(|texts| texts[row].clone())
            .collect();
        RowKey(parts)
    }
}
