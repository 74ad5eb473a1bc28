//! RecessLab Runner — hypothesis testing over recession-window price data.
//!
//! This crate builds on `recesslab-core` to provide:
//! - Exact two-sample t-tests (Welch and pooled-variance Student)
//! - Cohort partitioning and the recession-window price-ratio comparison
//! - TOML-backed run configuration with stable config IDs
//! - The memoized end-to-end analysis pipeline
//! - Deterministic synthetic inputs for tests and demos

pub mod cohort;
pub mod config;
pub mod pipeline;
pub mod stats;
pub mod synthetic;

pub use cohort::{compare, membership_from_table, Cohort, CohortSide, CompareError, TestResult};
pub use config::{
    AnalysisConfig, CohortConfig, ConfigError, GdpConfig, HousingConfig, TestConfig,
};
pub use pipeline::{AnalysisRun, PipelineError};
pub use stats::{t_cdf, two_sample_t_test, TestKind, TwoSampleTest};
pub use synthetic::{generate, SyntheticDataset};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_is_send_sync() {
        assert_send::<AnalysisConfig>();
        assert_sync::<AnalysisConfig>();
    }

    #[test]
    fn analysis_run_is_send_sync() {
        assert_send::<AnalysisRun>();
        assert_sync::<AnalysisRun>();
    }

    #[test]
    fn test_result_is_send_sync() {
        assert_send::<TestResult>();
        assert_sync::<TestResult>();
    }
}
