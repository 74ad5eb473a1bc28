//! Deterministic synthetic inputs for tests and demos.
//!
//! The generated GDP sheet carries a known recession (start 2002q1, end
//! 2002q4 when labels begin at 2000q1) and the housing table carries two
//! cohorts with clearly different price declines across it, so pipeline
//! tests have a ground truth to assert against.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write;

/// A matched triple of CSV payloads for one synthetic run.
pub struct SyntheticDataset {
    pub gdp_csv: String,
    pub housing_csv: String,
    pub membership_csv: String,
}

const PREAMBLE_ROWS: usize = 8;
const YEARS: std::ops::RangeInclusive<i32> = 2000..=2003;

/// Quarterly GDP values: eight rising quarters, a four-quarter decline,
/// then recovery. With labels from 2000q1 the peak lands on 2002q1 and the
/// trough on 2002q4.
const GDP_VALUES: [f64; 16] = [
    100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0, 107.0, // rise
    106.0, 105.0, 104.0, 103.0, // decline
    104.0, 106.0, 108.0, 110.0, // recovery
];

/// Generate a self-consistent GDP sheet, housing table, and membership
/// listing. Same seed, same bytes.
pub fn generate(seed: u64, member_rows: usize, other_rows: usize) -> SyntheticDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    SyntheticDataset {
        gdp_csv: gdp_csv(),
        housing_csv: housing_csv(&mut rng, member_rows, other_rows),
        membership_csv: membership_csv(member_rows),
    }
}

fn member_town(i: usize) -> (String, String) {
    ("Michigan".to_string(), format!("College Town {i}"))
}

fn other_town(i: usize) -> (String, String) {
    ("Ohio".to_string(), format!("Mill Town {i}"))
}

fn gdp_csv() -> String {
    let mut out = String::new();
    for i in 0..PREAMBLE_ROWS {
        writeln!(out, "preamble {i},,,,,,,").unwrap();
    }
    for (i, value) in GDP_VALUES.iter().enumerate() {
        let year = 2000 + (i / 4) as i32;
        let quarter = i % 4 + 1;
        // Annual cells stay blank like the trailing rows of the real sheet.
        writeln!(out, ",,,,{year}q{quarter},{:.1},{:.1},", value * 1.1, value).unwrap();
    }
    out
}

/// Price multiplier for the month at `index` (0 = 2000-01): flat before the
/// recession, a linear slide to `1 - drop` across 2002, flat after.
fn price_factor(index: usize, drop: f64) -> f64 {
    let recession = 24..36;
    if index < recession.start {
        1.0
    } else if recession.contains(&index) {
        1.0 - drop * (index - recession.start) as f64 / (recession.len() - 1) as f64
    } else {
        1.0 - drop
    }
}

fn housing_csv(rng: &mut StdRng, member_rows: usize, other_rows: usize) -> String {
    let mut out = String::from("RegionName,State");
    for year in YEARS {
        for month in 1..=12 {
            write!(out, ",{year}-{month:02}").unwrap();
        }
    }
    out.push('\n');

    let months = 12 * (YEARS.end() - YEARS.start() + 1) as usize;
    let mut push_row = |rng: &mut StdRng, state: String, region: String, drop: f64| {
        write!(out, "{region},{state}").unwrap();
        let base = rng.gen_range(80_000.0..400_000.0_f64);
        for index in 0..months {
            let noise = rng.gen_range(0.997..1.003);
            write!(out, ",{:.2}", base * price_factor(index, drop) * noise).unwrap();
        }
        out.push('\n');
    };

    // Member towns lose 5% over the recession, the rest lose 20%.
    for i in 0..member_rows {
        let (state, region) = member_town(i);
        push_row(rng, state, region, 0.05);
    }
    for i in 0..other_rows {
        let (state, region) = other_town(i);
        push_row(rng, state, region, 0.20);
    }
    out
}

fn membership_csv(member_rows: usize) -> String {
    let mut out = String::from("State,RegionName\n");
    for i in 0..member_rows {
        let (state, region) = member_town(i);
        writeln!(out, "{state},{region}").unwrap();
    }
    // A listed town missing from the housing table, as in the real data.
    out.push_str("Michigan,Phantom College Town\n");
    out
}
