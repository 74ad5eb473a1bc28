//! Table loader — delimited text in, typed [`Table`] out.
//!
//! The loader only parses. Fetching/decoding remote sources is the job of
//! [`fetch`](crate::data::fetch); pass the resulting local path here.

use crate::data::schema::{
    month_from_header, ColumnKind, ColumnSpec, HeaderRule, SchemaError, TableSchema,
};
use crate::domain::table::{Column, ColumnData, ColumnMeta, Table};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("schema mismatch: {0}")]
    SchemaMismatch(#[from] SchemaError),
}

/// Load a delimited file according to a schema.
pub fn load_csv(path: &Path, schema: &TableSchema) -> Result<Table, LoadError> {
    let file = File::open(path)
        .map_err(|e| LoadError::SourceUnavailable(format!("{}: {e}", path.display())))?;
    load_reader(file, schema)
}

/// Load from any reader (in-memory sources, tests).
pub fn load_reader<R: Read>(reader: R, schema: &TableSchema) -> Result<Table, LoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<StringRecord> = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record =
            record.map_err(|e| LoadError::SourceUnavailable(format!("row {i}: {e}")))?;
        if i < schema.skip_rows {
            continue;
        }
        rows.push(record);
    }

    let table = match &schema.header {
        HeaderRule::Declared(specs) => load_declared(&rows, schema.skip_rows, specs)?,
        HeaderRule::FromHeader { key_columns } => load_from_header(&rows, key_columns)?,
    };
    Ok(table)
}

/// Positional-name path: every raw row must match the declared width;
/// placeholder columns are dropped after assignment.
fn load_declared(
    rows: &[StringRecord],
    first_row: usize,
    specs: &[ColumnSpec],
) -> Result<Table, SchemaError> {
    for (i, row) in rows.iter().enumerate() {
        if row.len() != specs.len() {
            return Err(SchemaError::WidthMismatch {
                row: first_row + i,
                declared: specs.len(),
                actual: row.len(),
            });
        }
    }

    let mut columns = Vec::new();
    for (col_index, spec) in specs.iter().enumerate() {
        match spec.kind {
            ColumnKind::Placeholder => continue,
            ColumnKind::Key | ColumnKind::Text => {
                let meta = if spec.kind == ColumnKind::Key {
                    ColumnMeta::Key
                } else {
                    ColumnMeta::Plain
                };
                let values = rows.iter().map(|r| r[col_index].to_string()).collect();
                columns.push(Column::new(&spec.name, meta, ColumnData::Text(values)));
            }
            ColumnKind::Number => {
                let mut values = Vec::with_capacity(rows.len());
                for (i, row) in rows.iter().enumerate() {
                    values.push(parse_cell(&row[col_index], &spec.name, first_row + i)?);
                }
                columns.push(Column::new(&spec.name, ColumnMeta::Plain, ColumnData::Number(values)));
            }
        }
    }
    Ok(Table::new(columns)?)
}

/// Header-driven path: declared keys become `Key` text columns (emitted
/// first, in declared order), `YYYY-MM` headers become typed `Month` number
/// columns, everything else is dropped.
fn load_from_header(rows: &[StringRecord], key_columns: &[String]) -> Result<Table, SchemaError> {
    let (header, data) = match rows.split_first() {
        Some(split) => split,
        None => {
            // No header row at all: every declared key is missing.
            let first = key_columns.first().cloned().unwrap_or_default();
            return Err(SchemaError::MissingKeyColumn(first));
        }
    };

    for (i, row) in data.iter().enumerate() {
        if row.len() != header.len() {
            return Err(SchemaError::WidthMismatch {
                // +1 for the header row itself
                row: i + 1,
                declared: header.len(),
                actual: row.len(),
            });
        }
    }

    let mut columns = Vec::new();

    for key in key_columns {
        let col_index = header
            .iter()
            .position(|h| h == key)
            .ok_or_else(|| SchemaError::MissingKeyColumn(key.clone()))?;
        let values = data.iter().map(|r| r[col_index].to_string()).collect();
        columns.push(Column::new(key, ColumnMeta::Key, ColumnData::Text(values)));
    }

    for (col_index, name) in header.iter().enumerate() {
        let Some((year, month)) = month_from_header(name) else {
            continue;
        };
        let mut values = Vec::with_capacity(data.len());
        for (i, row) in data.iter().enumerate() {
            values.push(parse_cell(&row[col_index], name, i + 1)?);
        }
        columns.push(Column::new(
            name,
            ColumnMeta::Month { year, month },
            ColumnData::Number(values),
        ));
    }

    Ok(Table::new(columns)?)
}

/// Empty cells are missing; anything else must parse as a float.
fn parse_cell(cell: &str, column: &str, row: usize) -> Result<Option<f64>, SchemaError> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|_| SchemaError::TypeMismatch {
            column: column.to_string(),
            row,
            value: cell.to_string(),
        })
}
