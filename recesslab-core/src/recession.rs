//! Recession window detection over a quarterly GDP series.
//!
//! One unambiguous rule, applied consistently:
//! - start: first index `i >= 1` where `v[i-1] > v[i] > v[i+1]` — a peak
//!   followed by a full quarter of decline, with growth into the peak.
//! - end: first index `i >= start` where `v[i] < v[i+1] < v[i+2]` — the
//!   trough, confirmed by two consecutive quarters of growth.
//!
//! All look-ahead is bounds-checked; a candidate whose look-ahead would run
//! past the series is skipped, never assumed to match. The chronological /
//! gap-free precondition is enforced by [`QuarterSeries`] construction, so a
//! series that reaches this module is well-formed by type.

use crate::domain::quarter::QuarterLabel;
use crate::domain::series::QuarterSeries;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecessionError {
    #[error("no qualifying recession pattern before the series is exhausted")]
    NotFound,
}

/// The (start, end) quarter labels bounding a contraction-then-recovery
/// pattern. Invariant: `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecessionWindow {
    pub start: QuarterLabel,
    pub end: QuarterLabel,
}

/// First index `i >= 1` with `v[i-1] > v[i] > v[i+1]`.
pub fn find_start(values: &[f64]) -> Result<usize, RecessionError> {
    for i in 1..values.len() {
        if i + 1 >= values.len() {
            break;
        }
        if values[i - 1] > values[i] && values[i] > values[i + 1] {
            return Ok(i);
        }
    }
    Err(RecessionError::NotFound)
}

/// First index `i >= from` with `v[i] < v[i+1] < v[i+2]`.
pub fn find_end(values: &[f64], from: usize) -> Result<usize, RecessionError> {
    for i in from..values.len() {
        if i + 2 >= values.len() {
            break;
        }
        if values[i] < values[i + 1] && values[i + 1] < values[i + 2] {
            return Ok(i);
        }
    }
    Err(RecessionError::NotFound)
}

/// Locate the first recession window in a series.
pub fn find_window(series: &QuarterSeries) -> Result<RecessionWindow, RecessionError> {
    let values = series.values();
    let start = find_start(values)?;
    let end = find_end(values, start)?;
    // The start index declines into i+1, so the end pattern can first match
    // strictly after it.
    debug_assert!(start < end);
    Ok(RecessionWindow {
        start: series.label(start),
        end: series.label(end),
    })
}
