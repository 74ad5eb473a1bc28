//! The end-to-end analysis run.
//!
//! `AnalysisRun::load` performs all the expensive work once: load the GDP
//! sheet, cut it to the configured first quarter, locate the recession
//! window, load the housing table and aggregate it to quarter means. The
//! results live on the run and every accessor reads the stored value, so a
//! caller can probe the window, the quarterly table, and multiple cohort
//! comparisons without re-deriving anything.

use crate::cohort::{self, Cohort, CompareError, TestResult};
use crate::config::AnalysisConfig;
use recesslab_core::aggregate::{aggregate, AggregateError, QuarterWindows};
use recesslab_core::data::loader::{load_csv, LoadError};
use recesslab_core::domain::{QuarterSeries, RowKey, SeriesError, Table};
use recesslab_core::recession::{find_window, RecessionError, RecessionWindow};
use std::collections::HashSet;
use thiserror::Error;

/// Pipeline failures, tagged with the stage that produced them.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("load GDP table: {0}")]
    Gdp(#[source] LoadError),

    #[error("build GDP series: {0}")]
    GdpSeries(#[from] SeriesError),

    #[error("locate recession window: {0}")]
    Recession(#[from] RecessionError),

    #[error("load housing table: {0}")]
    Housing(#[source] LoadError),

    #[error("aggregate housing quarters: {0}")]
    Aggregate(#[from] AggregateError),

    #[error("load cohort membership: {0}")]
    Membership(#[source] LoadError),

    #[error(transparent)]
    Compare(#[from] CompareError),
}

/// A fully materialized analysis: inputs loaded, window located, quarters
/// aggregated.
pub struct AnalysisRun {
    config: AnalysisConfig,
    gdp_series: QuarterSeries,
    window: RecessionWindow,
    quarterly: Table,
}

impl AnalysisRun {
    /// Load all inputs and derive the recession window and quarterly table.
    pub fn load(config: AnalysisConfig) -> Result<Self, PipelineError> {
        let gdp_table =
            load_csv(&config.gdp.path, &config.gdp.schema()).map_err(PipelineError::Gdp)?;
        let full_series = QuarterSeries::from_table(
            &gdp_table,
            &config.gdp.label_column,
            &config.gdp.value_column,
        )?;
        let gdp_series = full_series.slice_from(config.gdp.first_quarter)?;
        let window = find_window(&gdp_series)?;

        let housing = load_csv(&config.housing.path, &config.housing.schema())
            .map_err(PipelineError::Housing)?;
        let quarterly = aggregate(&housing, &config.housing.years, &QuarterWindows::calendar())?;

        Ok(Self { config, gdp_series, window, quarterly })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The GDP series the window was located in (post-cutoff).
    pub fn gdp_series(&self) -> &QuarterSeries {
        &self.gdp_series
    }

    pub fn recession_window(&self) -> &RecessionWindow {
        &self.window
    }

    /// Housing prices aggregated to quarter-mean columns.
    pub fn quarterly_table(&self) -> &Table {
        &self.quarterly
    }

    /// Deterministic hash of the derived data.
    ///
    /// Covers the GDP series and every quarterly column, so two runs over
    /// the same inputs and config produce the same hex digest.
    pub fn dataset_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for (label, value) in self.gdp_series.labels().iter().zip(self.gdp_series.values()) {
            hasher.update(label.to_string().as_bytes());
            hasher.update(&value.to_le_bytes());
        }
        for column in self.quarterly.columns() {
            hasher.update(column.name().as_bytes());
            match column.numbers() {
                Some(numbers) => {
                    for value in numbers {
                        match value {
                            Some(v) => {
                                hasher.update(&[1]);
                                hasher.update(&v.to_le_bytes());
                            }
                            None => {
                                hasher.update(&[0]);
                            }
                        }
                    }
                }
                None => {
                    if let Some(texts) = column.texts() {
                        for text in texts {
                            hasher.update(text.as_bytes());
                            hasher.update(&[0xff]);
                        }
                    }
                }
            }
        }
        hasher.finalize().to_hex().to_string()
    }

    /// Read the membership listing named in the config into a key set.
    pub fn load_membership(&self) -> Result<HashSet<RowKey>, PipelineError> {
        let schema = recesslab_core::data::schema::TableSchema {
            skip_rows: 0,
            header: recesslab_core::data::schema::HeaderRule::FromHeader {
                key_columns: self.config.housing.key_columns.clone(),
            },
        };
        let table = load_csv(&self.config.cohorts.members_path, &schema)
            .map_err(PipelineError::Membership)?;
        Ok(cohort::membership_from_table(&table))
    }

    /// Partition the quarterly rows by `membership` and run the configured
    /// hypothesis test across the recession window.
    pub fn run_comparison(
        &self,
        membership: &HashSet<RowKey>,
    ) -> Result<TestResult, PipelineError> {
        let members = Cohort::from_table(
            &self.quarterly,
            self.config.cohorts.member_name.clone(),
            &self.window,
            |key| membership.contains(key),
        )?;
        let rest = Cohort::from_table(
            &self.quarterly,
            self.config.cohorts.rest_name.clone(),
            &self.window,
            |key| !membership.contains(key),
        )?;
        Ok(cohort::compare(&members, &rest, self.config.test.kind, self.config.test.alpha)?)
    }

    /// `load_membership` followed by `run_comparison`.
    pub fn run(&self) -> Result<TestResult, PipelineError> {
        let membership = self.load_membership()?;
        self.run_comparison(&membership)
    }
}
