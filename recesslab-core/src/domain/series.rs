//! QuarterSeries — a chronological, gap-free sequence of quarterly values.
//!
//! The constructor is the single enforcement point for the series
//! precondition (strictly increasing, contiguous labels); downstream
//! consumers like the recession finder rely on it.

use crate::domain::quarter::QuarterLabel;
use crate::domain::table::Table;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("malformed series: {reason}")]
    MalformedSeries { reason: String },

    #[error("quarter {0} not present in series")]
    LabelNotFound(QuarterLabel),

    #[error("column {0:?} not present in table")]
    MissingColumn(String),
}

/// Quarterly observations with contiguous, strictly ascending labels.
#[derive(Debug, Clone, PartialEq)]
pub struct QuarterSeries {
    labels: Vec<QuarterLabel>,
    values: Vec<f64>,
}

impl QuarterSeries {
    pub fn new(labels: Vec<QuarterLabel>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if labels.len() != values.len() {
            return Err(SeriesError::MalformedSeries {
                reason: format!("{} labels but {} values", labels.len(), values.len()),
            });
        }
        for pair in labels.windows(2) {
            if pair[1] != pair[0].succ() {
                return Err(SeriesError::MalformedSeries {
                    reason: format!("{} is not followed by {}", pair[0], pair[0].succ()),
                });
            }
        }
        Ok(Self { labels, values })
    }

    /// Build a series from a loaded table: one text column of quarter labels
    /// and one numeric column of values.
    ///
    /// Rows with an empty label are skipped (raw GDP sheets interleave
    /// annual-only rows whose quarterly cells are blank). A non-empty label
    /// with a missing value is a gap and fails with `MalformedSeries`.
    pub fn from_table(
        table: &Table,
        label_column: &str,
        value_column: &str,
    ) -> Result<Self, SeriesError> {
        let labels_col = table
            .column(label_column)
            .and_then(|c| c.texts())
            .ok_or_else(|| SeriesError::MissingColumn(label_column.to_string()))?;
        let values_col = table
            .column(value_column)
            .and_then(|c| c.numbers())
            .ok_or_else(|| SeriesError::MissingColumn(value_column.to_string()))?;

        let mut labels = Vec::new();
        let mut values = Vec::new();
        for (raw_label, value) in labels_col.iter().zip(values_col) {
            let token = raw_label.trim();
            if token.is_empty() {
                continue;
            }
            let label: QuarterLabel =
                token.parse().map_err(|e| SeriesError::MalformedSeries {
                    reason: format!("{e}"),
                })?;
            let value = value.ok_or_else(|| SeriesError::MalformedSeries {
                reason: format!("missing value at {label}"),
            })?;
            labels.push(label);
            values.push(value);
        }
        Self::new(labels, values)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[QuarterLabel] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn label(&self, index: usize) -> QuarterLabel {
        self.labels[index]
    }

    /// Position of a label, if observed.
    pub fn position(&self, label: QuarterLabel) -> Option<usize> {
        // Contiguity makes this an offset computation, but a scan keeps it
        // obviously correct for the series sizes involved.
        self.labels.iter().position(|&l| l == label)
    }

    /// Drop observations before `label`. Fails if the label is not observed.
    pub fn slice_from(&self, label: QuarterLabel) -> Result<QuarterSeries, SeriesError> {
        let at = self
            .position(label)
            .ok_or(SeriesError::LabelNotFound(label))?;
        Ok(QuarterSeries {
            labels: self.labels[at..].to_vec(),
            values: self.values[at..].to_vec(),
        })
    }
}
