//! Cohort partitioning and the recession-window price comparison.
//!
//! A cohort is a named partition of a quarterly table's rows, selected by a
//! membership predicate over the row key. Each member row contributes one
//! price ratio, `value[start] / value[end]`; a lower ratio means a smaller
//! relative price decline across the recession.

use crate::stats::{two_sample_t_test, TestKind};
use recesslab_core::domain::{Column, ColumnMeta, QuarterLabel, RowKey, Table};
use recesslab_core::recession::RecessionWindow;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CompareError {
    #[error("quarter column {0} not present in quarterly table")]
    MissingQuarter(QuarterLabel),

    #[error("cohort {cohort:?} has {rows} usable rows, need at least 2")]
    InsufficientData { cohort: String, rows: usize },
}

/// Which side of the comparison a result refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CohortSide {
    A,
    B,
}

/// A named cohort and its per-row price ratios.
#[derive(Debug, Clone, PartialEq)]
pub struct Cohort {
    pub name: String,
    pub ratios: Vec<f64>,
}

impl Cohort {
    /// Extract one cohort's ratio sample from a quarterly table.
    ///
    /// Rows failing the membership predicate are ignored; member rows with a
    /// missing value at either end of the window (or a zero at the end,
    /// which has no meaningful ratio) are excluded from the sample.
    pub fn from_table(
        table: &Table,
        name: impl Into<String>,
        window: &RecessionWindow,
        is_member: impl Fn(&RowKey) -> bool,
    ) -> Result<Self, CompareError> {
        let start = quarter_column(table, window.start)?;
        let end = quarter_column(table, window.end)?;

        let mut ratios = Vec::new();
        for row in 0..table.row_count() {
            if !is_member(&table.row_key(row)) {
                continue;
            }
            if let (Some(start_value), Some(end_value)) = (start[row], end[row]) {
                if end_value != 0.0 {
                    ratios.push(start_value / end_value);
                }
            }
        }
        Ok(Self { name: name.into(), ratios })
    }

    pub fn mean_ratio(&self) -> Option<f64> {
        if self.ratios.is_empty() {
            return None;
        }
        Some(self.ratios.iter().sum::<f64>() / self.ratios.len() as f64)
    }
}

fn quarter_column(table: &Table, label: QuarterLabel) -> Result<&[Option<f64>], CompareError> {
    table
        .columns()
        .iter()
        .find(|c| c.meta() == ColumnMeta::Quarter(label))
        .and_then(Column::numbers)
        .ok_or(CompareError::MissingQuarter(label))
}

/// Outcome of the two-cohort hypothesis test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// True when the equal-means null is rejected at the configured alpha.
    pub rejected_null: bool,
    /// Exact two-sided p-value from the t-test.
    pub p_value: f64,
    /// The side with the lower mean price ratio (the smaller relative loss).
    pub lower_loss: CohortSide,
    pub mean_ratio_a: f64,
    pub mean_ratio_b: f64,
}

/// Run the two-sample mean-difference test over two cohorts' ratio samples.
///
/// Swapping the cohorts swaps `lower_loss` and the mean fields but leaves
/// `p_value` (and therefore `rejected_null`) unchanged. A mean tie resolves
/// to side A.
pub fn compare(
    a: &Cohort,
    b: &Cohort,
    kind: TestKind,
    alpha: f64,
) -> Result<TestResult, CompareError> {
    let undersized = |c: &Cohort| CompareError::InsufficientData {
        cohort: c.name.clone(),
        rows: c.ratios.len(),
    };
    if a.ratios.len() < 2 {
        return Err(undersized(a));
    }
    if b.ratios.len() < 2 {
        return Err(undersized(b));
    }

    let test = two_sample_t_test(&a.ratios, &b.ratios, kind).ok_or_else(|| undersized(a))?;

    // mean_ratio is Some for both: each sample has >= 2 rows.
    let mean_a = a.mean_ratio().ok_or_else(|| undersized(a))?;
    let mean_b = b.mean_ratio().ok_or_else(|| undersized(b))?;

    Ok(TestResult {
        rejected_null: test.p_value < alpha,
        p_value: test.p_value,
        lower_loss: if mean_a <= mean_b { CohortSide::A } else { CohortSide::B },
        mean_ratio_a: mean_a,
        mean_ratio_b: mean_b,
    })
}

/// Collect the row keys of a loaded table into a membership set.
///
/// The table only needs key columns (e.g. a two-column `State,RegionName`
/// listing of university towns).
pub fn membership_from_table(table: &Table) -> HashSet<RowKey> {
    (0..table.row_count()).map(|row| table.row_key(row)).collect()
}
