//! Serializable analysis configuration.
//!
//! Everything the original scripts hard-coded (paths, skip counts, column
//! names, the first-quarter cutoff, the test flavor) lives here, with
//! defaults matching those constants. Configs load from TOML and hash to a
//! deterministic config ID.

use crate::stats::TestKind;
use recesslab_core::data::schema::{ColumnSpec, HeaderRule, TableSchema};
use recesslab_core::domain::QuarterLabel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// GDP source: where it is and how to read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GdpConfig {
    pub path: PathBuf,
    pub skip_rows: usize,
    /// Positional column names for the raw sheet; placeholders are dropped.
    pub columns: Vec<ColumnSpec>,
    pub label_column: String,
    pub value_column: String,
    /// Observations before this quarter are discarded.
    pub first_quarter: QuarterLabel,
}

impl Default for GdpConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("gdplev.csv"),
            skip_rows: 8,
            columns: vec![
                ColumnSpec::number("Year"),
                ColumnSpec::number("Annual GDP Current Billions"),
                ColumnSpec::number("Annual GDP 2009 Billions"),
                ColumnSpec::placeholder("to_delete"),
                ColumnSpec::text("YearQuarter"),
                ColumnSpec::number("Quarterly GDP Current Billions"),
                ColumnSpec::number("Quarterly GDP 2009 Billions"),
                ColumnSpec::placeholder("to_delete"),
            ],
            label_column: "YearQuarter".into(),
            value_column: "Quarterly GDP 2009 Billions".into(),
            first_quarter: QuarterLabel::new(2000, 1),
        }
    }
}

impl GdpConfig {
    pub fn schema(&self) -> TableSchema {
        TableSchema {
            skip_rows: self.skip_rows,
            header: HeaderRule::Declared(self.columns.clone()),
        }
    }
}

/// Housing source: the Zillow all-homes price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HousingConfig {
    pub path: PathBuf,
    pub key_columns: Vec<String>,
    /// Years whose monthly columns are aggregated into quarters.
    pub years: Vec<i32>,
}

impl Default for HousingConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("City_Zhvi_AllHomes.csv"),
            key_columns: vec!["State".into(), "RegionName".into()],
            years: (2000..=2016).collect(),
        }
    }
}

impl HousingConfig {
    pub fn schema(&self) -> TableSchema {
        TableSchema {
            skip_rows: 0,
            header: HeaderRule::FromHeader { key_columns: self.key_columns.clone() },
        }
    }
}

/// Cohort membership listing and display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CohortConfig {
    /// Key-column CSV listing the member rows (e.g. university towns).
    pub members_path: PathBuf,
    pub member_name: String,
    pub rest_name: String,
}

impl Default for CohortConfig {
    fn default() -> Self {
        Self {
            members_path: PathBuf::from("university_towns.csv"),
            member_name: "university town".into(),
            rest_name: "non-university town".into(),
        }
    }
}

/// Hypothesis test parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    pub kind: TestKind,
    pub alpha: f64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self { kind: TestKind::Welch, alpha: 0.01 }
    }
}

/// Complete configuration for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub gdp: GdpConfig,
    pub housing: HousingConfig,
    pub cohorts: CohortConfig,
    pub test: TestConfig,
}

impl AnalysisConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string. Missing sections take defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs get the same ID, so cached/memoized
    /// results can be keyed by it.
    pub fn config_id(&self) -> String {
        let json = serde_json::to_string(self).expect("AnalysisConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
