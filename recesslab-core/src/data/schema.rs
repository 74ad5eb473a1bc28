//! Declarative load schemas.
//!
//! A schema says how to turn raw delimited rows into a typed [`Table`]:
//! how many leading rows to skip, where column names come from, and which
//! columns are keys, numbers, or placeholders to drop.
//!
//! [`Table`]: crate::domain::Table

use crate::domain::table::TableError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What kind of column a declared name describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Text column that is part of the row identity.
    Key,
    /// Missing-aware numeric column (empty cell parses as missing).
    Number,
    /// Untyped text column.
    Text,
    /// Present in the raw source but dropped from the loaded table.
    Placeholder,
}

/// One declared column: a name and what to do with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn key(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: ColumnKind::Key }
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: ColumnKind::Number }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: ColumnKind::Text }
    }

    pub fn placeholder(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: ColumnKind::Placeholder }
    }
}

/// Where column names come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderRule {
    /// No usable header: assign the declared names positionally. Every raw
    /// row must have exactly this many cells; placeholder columns are
    /// dropped after assignment.
    Declared(Vec<ColumnSpec>),

    /// The first (post-skip) row is a header. The named key columns become
    /// `Key` text columns; headers of the form `YYYY-MM` become typed
    /// `Month` number columns; every other header is dropped.
    ///
    /// Key columns are emitted first, in the order declared here, so row
    /// keys have a stable field order regardless of the raw file layout.
    FromHeader { key_columns: Vec<String> },
}

/// Complete recipe for loading one delimited source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Leading raw rows to discard before anything else.
    pub skip_rows: usize,
    pub header: HeaderRule,
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("row {row} has {actual} cells, schema declares {declared}")]
    WidthMismatch {
        row: usize,
        declared: usize,
        actual: usize,
    },

    #[error("declared key column {0:?} not found in header")]
    MissingKeyColumn(String),

    #[error("column {column:?} row {row}: {value:?} is not numeric")]
    TypeMismatch {
        column: String,
        row: usize,
        value: String,
    },

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Parse a `YYYY-MM` header into (year, month), if it is one.
///
/// Delegates validity (month 1..=12) to chrono by parsing the first day of
/// the month.
pub fn month_from_header(name: &str) -> Option<(i32, u32)> {
    // Quick shape check avoids handing arbitrary headers to the date parser.
    let (year, month) = name.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    let date = NaiveDate::parse_from_str(&format!("{name}-01"), "%Y-%m-%d").ok()?;
    Some((date.year(), date.month()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_from_header_accepts_year_month_tokens() {
        assert_eq!(month_from_header("2008-09"), Some((2008, 9)));
        assert_eq!(month_from_header("2016-12"), Some((2016, 12)));
    }

    #[test]
    fn month_from_header_rejects_other_headers() {
        for name in ["State", "RegionName", "2008", "2008-13", "2008-9", "2008-09-01", ""] {
            assert_eq!(month_from_header(name), None, "accepted {name:?}");
        }
    }
}
