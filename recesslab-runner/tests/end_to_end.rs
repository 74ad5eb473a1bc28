//! Full-pipeline tests over synthetic inputs with a known ground truth.

use recesslab_core::domain::QuarterLabel;
use recesslab_runner::config::AnalysisConfig;
use recesslab_runner::pipeline::AnalysisRun;
use recesslab_runner::synthetic;
use recesslab_runner::{CohortSide, TestKind};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write one synthetic dataset into `dir` and return a config pointing at it.
fn config_for(dir: &Path, seed: u64) -> AnalysisConfig {
    let dataset = synthetic::generate(seed, 20, 20);
    fs::write(dir.join("gdplev.csv"), &dataset.gdp_csv).unwrap();
    fs::write(dir.join("housing.csv"), &dataset.housing_csv).unwrap();
    fs::write(dir.join("towns.csv"), &dataset.membership_csv).unwrap();

    let mut config = AnalysisConfig::default();
    config.gdp.path = dir.join("gdplev.csv");
    config.housing.path = dir.join("housing.csv");
    config.housing.years = (2000..=2003).collect();
    config.cohorts.members_path = dir.join("towns.csv");
    config
}

#[test]
fn locates_the_planted_recession_window() {
    let dir = TempDir::new().unwrap();
    let run = AnalysisRun::load(config_for(dir.path(), 42)).unwrap();

    let window = run.recession_window();
    assert_eq!(window.start, QuarterLabel::new(2002, 1));
    assert_eq!(window.end, QuarterLabel::new(2002, 4));
}

#[test]
fn college_towns_show_the_smaller_price_decline() {
    let dir = TempDir::new().unwrap();
    let run = AnalysisRun::load(config_for(dir.path(), 42)).unwrap();
    let result = run.run().unwrap();

    // A 5% vs 20% planted decline should separate decisively.
    assert!(result.rejected_null);
    assert!(result.p_value < 0.01);
    assert_eq!(result.lower_loss, CohortSide::A);
    assert!(result.mean_ratio_a < result.mean_ratio_b);
    // Declining prices put both ratio means above one.
    assert!(result.mean_ratio_a > 1.0);
}

#[test]
fn student_flavor_reaches_the_same_conclusion() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(dir.path(), 42);
    config.test.kind = TestKind::Student;
    let run = AnalysisRun::load(config).unwrap();
    let result = run.run().unwrap();

    assert!(result.rejected_null);
    assert_eq!(result.lower_loss, CohortSide::A);
}

#[test]
fn loads_are_deterministic() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path(), 7);

    let first = AnalysisRun::load(config.clone()).unwrap();
    let second = AnalysisRun::load(config).unwrap();

    assert_eq!(first.dataset_hash(), second.dataset_hash());
    assert_eq!(first.quarterly_table(), second.quarterly_table());
    assert_eq!(first.gdp_series(), second.gdp_series());
}

#[test]
fn repeated_comparisons_reuse_the_loaded_run() {
    let dir = TempDir::new().unwrap();
    let run = AnalysisRun::load(config_for(dir.path(), 9)).unwrap();
    let membership = run.load_membership().unwrap();

    let a = run.run_comparison(&membership).unwrap();
    let b = run.run_comparison(&membership).unwrap();
    assert_eq!(a.p_value, b.p_value);
    assert_eq!(a.lower_loss, b.lower_loss);
    assert_eq!(a.rejected_null, b.rejected_null);
}

#[test]
fn different_seeds_change_the_dataset_hash() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    let run_a = AnalysisRun::load(config_for(dir_a.path(), 1)).unwrap();
    let run_b = AnalysisRun::load(config_for(dir_b.path(), 2)).unwrap();

    // Housing noise differs by seed; the GDP sheet is fixed.
    assert_ne!(run_a.dataset_hash(), run_b.dataset_hash());
    assert_eq!(run_a.recession_window(), run_b.recession_window());
}

#[test]
fn config_round_trips_through_a_file() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path(), 3);
    let path = dir.path().join("analysis.toml");
    fs::write(&path, toml::to_string(&config).unwrap()).unwrap();

    let reloaded = AnalysisConfig::from_file(&path).unwrap();
    assert_eq!(reloaded, config);
    assert_eq!(reloaded.config_id(), config.config_id());
}
