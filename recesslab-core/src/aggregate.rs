//! Quarterly aggregation — monthly observation columns to quarter-mean columns.
//!
//! For each requested year and each quarter window, the matching `Month`
//! columns are selected structurally and averaged row-wise. Rows where every
//! contributing month is missing stay missing; quarter columns that are
//! missing for every row (future quarters) are dropped. Key columns and row
//! order pass through unchanged.

use crate::domain::quarter::QuarterLabel;
use crate::domain::table::{Column, ColumnData, ColumnMeta, Table, TableError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("quarter windows must cover months 1-12 exactly once")]
    InvalidWindows,

    #[error("table has no month columns to aggregate")]
    NoMonthColumns,

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Four disjoint 3-month windows covering the calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuarterWindows {
    windows: [[u32; 3]; 4],
}

impl QuarterWindows {
    /// Validates that the four windows cover months 1..=12 exactly once.
    pub fn new(windows: [[u32; 3]; 4]) -> Result<Self, AggregateError> {
        let mut seen = [false; 12];
        for month in windows.iter().flatten() {
            if !(1..=12).contains(month) || seen[(*month - 1) as usize] {
                return Err(AggregateError::InvalidWindows);
            }
            seen[(*month - 1) as usize] = true;
        }
        Ok(Self { windows })
    }

    /// The standard calendar quarters: {1,2,3}, {4,5,6}, {7,8,9}, {10,11,12}.
    pub fn calendar() -> Self {
        Self {
            windows: [[1, 2, 3], [4, 5, 6], [7, 8, 9], [10, 11, 12]],
        }
    }

    pub fn window(&self, quarter_index: usize) -> &[u32; 3] {
        &self.windows[quarter_index]
    }
}

impl Default for QuarterWindows {
    fn default() -> Self {
        Self::calendar()
    }
}

/// Aggregate monthly columns into quarter-mean columns.
///
/// Output quarter columns are ordered by (year, quarter) ascending regardless
/// of the raw column order or the order of `years`.
pub fn aggregate(
    table: &Table,
    years: &[i32],
    windows: &QuarterWindows,
) -> Result<Table, AggregateError> {
    if table.select(|m| matches!(m, ColumnMeta::Month { .. })).is_empty() {
        return Err(AggregateError::NoMonthColumns);
    }

    let mut years: Vec<i32> = years.to_vec();
    years.sort_unstable();
    years.dedup();

    let mut columns: Vec<Column> = table.key_columns().into_iter().cloned().collect();

    for &year in &years {
        for quarter_index in 0..4 {
            let window = windows.window(quarter_index);
            let contributing = table.select(|m| {
                matches!(m, ColumnMeta::Month { year: y, month } if y == year && window.contains(&month))
            });
            if contributing.is_empty() {
                continue;
            }

            let values = row_means(&contributing, table.row_count());
            if values.iter().all(Option::is_none) {
                continue;
            }

            let label = QuarterLabel::new(year, quarter_index as u8 + 1);
            columns.push(Column::new(
                label.to_string(),
                ColumnMeta::Quarter(label),
                ColumnData::Number(values),
            ));
        }
    }

    Ok(Table::new(columns)?)
}

/// Row-wise arithmetic mean over the present values; all-missing stays missing.
fn row_means(contributing: &[&Column], row_count: usize) -> Vec<Option<f64>> {
    let numbers: Vec<&[Option<f64>]> =
        contributing.iter().filter_map(|c| c.numbers()).collect();

    (0..row_count)
        .map(|row| {
            let mut sum = 0.0;
            let mut count = 0usize;
            for col in &numbers {
                if let Some(v) = col[row] {
                    sum += v;
                    count += 1;
                }
            }
            (count > 0).then(|| sum / count as f64)
        })
        .collect()
}
