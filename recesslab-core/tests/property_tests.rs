//! Property tests for core invariants.
//!
//! Uses proptest to verify:
//! 1. Quarter labels round-trip through the token form and order like time
//! 2. Quarter means are bounded by the contributing month extremes
//! 3. The recession finder never returns an out-of-bounds index and every
//!    returned index actually satisfies the declared pattern

use proptest::prelude::*;
use recesslab_core::domain::{Column, ColumnData, ColumnMeta, QuarterLabel, Table};
use recesslab_core::recession::{find_end, find_start};
use recesslab_core::{aggregate, QuarterWindows};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_label() -> impl Strategy<Value = QuarterLabel> {
    (1900i32..2100, 1u8..=4).prop_map(|(year, quarter)| QuarterLabel::new(year, quarter))
}

fn arb_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000.0..1000.0f64, 0..40)
}

// ── 1. Quarter label round trip and ordering ─────────────────────────

proptest! {
    #[test]
    fn label_round_trips_through_token_form(label in arb_label()) {
        let parsed: QuarterLabel = label.to_string().parse().unwrap();
        prop_assert_eq!(parsed, label);
    }

    #[test]
    fn label_order_matches_linear_quarter_count(a in arb_label(), b in arb_label()) {
        let linear = |l: QuarterLabel| i64::from(l.year()) * 4 + i64::from(l.quarter());
        prop_assert_eq!(a.cmp(&b), linear(a).cmp(&linear(b)));
    }

    #[test]
    fn succ_is_strictly_increasing_by_one_quarter(label in arb_label()) {
        let next = label.succ();
        prop_assert!(next > label);
        let linear = |l: QuarterLabel| i64::from(l.year()) * 4 + i64::from(l.quarter());
        prop_assert_eq!(linear(next), linear(label) + 1);
    }
}

// ── 2. Aggregation bounds ────────────────────────────────────────────

proptest! {
    /// A quarter mean lies between the min and max of its contributing months.
    #[test]
    fn quarter_mean_is_bounded_by_inputs(
        rows in prop::collection::vec((10.0..500.0f64, 10.0..500.0f64, 10.0..500.0f64), 1..20)
    ) {
        let col = |month: u32, values: Vec<Option<f64>>| {
            Column::new(
                format!("2008-{month:02}"),
                ColumnMeta::Month { year: 2008, month },
                ColumnData::Number(values),
            )
        };
        let table = Table::new(vec![
            col(1, rows.iter().map(|r| Some(r.0)).collect()),
            col(2, rows.iter().map(|r| Some(r.1)).collect()),
            col(3, rows.iter().map(|r| Some(r.2)).collect()),
        ])
        .unwrap();

        let out = aggregate(&table, &[2008], &QuarterWindows::calendar()).unwrap();
        let means = out.column("2008q1").unwrap().numbers().unwrap();

        for (row, mean) in rows.iter().zip(means) {
            let mean = mean.unwrap();
            let lo = row.0.min(row.1).min(row.2);
            let hi = row.0.max(row.1).max(row.2);
            prop_assert!(mean >= lo - 1e-9 && mean <= hi + 1e-9);
        }
    }
}

// ── 3. Recession finder bounds and pattern ───────────────────────────

proptest! {
    #[test]
    fn start_index_is_in_bounds_and_satisfies_the_pattern(values in arb_values()) {
        if let Ok(i) = find_start(&values) {
            prop_assert!(i >= 1 && i + 1 < values.len());
            prop_assert!(values[i - 1] > values[i] && values[i] > values[i + 1]);
        }
    }

    #[test]
    fn end_index_is_in_bounds_and_satisfies_the_pattern(values in arb_values(), from in 0usize..40) {
        if let Ok(i) = find_end(&values, from) {
            prop_assert!(i >= from && i + 2 < values.len());
            prop_assert!(values[i] < values[i + 1] && values[i + 1] < values[i + 2]);
        }
    }
}
