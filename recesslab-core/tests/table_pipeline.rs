//! Integration tests: loader output feeding the aggregation and recession
//! stages, over realistic raw fixtures.

use recesslab_core::data::schema::{ColumnSpec, HeaderRule, TableSchema};
use recesslab_core::data::{load_csv, load_reader};
use recesslab_core::domain::{ColumnMeta, QuarterSeries};
use recesslab_core::{aggregate, find_window, QuarterWindows};

fn gdp_schema() -> TableSchema {
    TableSchema {
        skip_rows: 8,
        header: HeaderRule::Declared(vec![
            ColumnSpec::number("Year"),
            ColumnSpec::number("Annual GDP Current Billions"),
            ColumnSpec::number("Annual GDP 2009 Billions"),
            ColumnSpec::placeholder("to_delete"),
            ColumnSpec::text("YearQuarter"),
            ColumnSpec::number("Quarterly GDP Current Billions"),
            ColumnSpec::number("Quarterly GDP 2009 Billions"),
            ColumnSpec::placeholder("to_delete_2"),
        ]),
    }
}

/// Eight preamble rows, then a quarterly section shaped like the real GDP
/// sheet: peak at 2008q2, trough at 2009q2.
fn gdp_fixture() -> String {
    let mut raw = String::new();
    for i in 0..8 {
        raw.push_str(&format!("preamble {i},,,,,,,\n"));
    }
    let quarters = [
        ("2008q1", 14889.5),
        ("2008q2", 14963.4),
        ("2008q3", 14891.6),
        ("2008q4", 14577.0),
        ("2009q1", 14375.0),
        ("2009q2", 14355.6),
        ("2009q3", 14402.5),
        ("2009q4", 14541.9),
    ];
    for (label, gdp) in quarters {
        raw.push_str(&format!("2008,1.0,2.0,x,{label},{gdp},{gdp},y\n"));
    }
    raw
}

#[test]
fn gdp_fixture_yields_the_2008_recession_window() {
    let table = load_reader(gdp_fixture().as_bytes(), &gdp_schema()).unwrap();
    let series =
        QuarterSeries::from_table(&table, "YearQuarter", "Quarterly GDP 2009 Billions").unwrap();

    let window = find_window(&series).unwrap();
    assert_eq!(window.start.to_string(), "2008q3");
    assert_eq!(window.end.to_string(), "2009q2");
}

#[test]
fn housing_fixture_aggregates_to_quarter_means() {
    let raw = "\
RegionID,RegionName,State,Metro,2008-01,2008-02,2008-03,2008-04,2008-05,2008-06\n\
1,Akron,Ohio,AkronMetro,120000,121000,122000,121500,121000,120500\n\
2,Ann Arbor,Michigan,A2,210000,211000,212000,,,\n";
    let schema = TableSchema {
        skip_rows: 0,
        header: HeaderRule::FromHeader {
            key_columns: vec!["State".into(), "RegionName".into()],
        },
    };

    let table = load_reader(raw.as_bytes(), &schema).unwrap();
    let quarterly = aggregate(&table, &[2008], &QuarterWindows::calendar()).unwrap();

    let q1 = quarterly.column("2008q1").unwrap();
    assert_eq!(q1.meta(), ColumnMeta::Quarter("2008q1".parse().unwrap()));
    assert_eq!(q1.numbers().unwrap(), &[Some(121000.0), Some(211000.0)]);

    // Ann Arbor has no q2 data; Akron's q2 mean is present.
    let q2 = quarterly.column("2008q2").unwrap();
    assert_eq!(q2.numbers().unwrap(), &[Some(121000.0), None]);

    // Row identity carried through the aggregation.
    assert_eq!(quarterly.row_key(1).0, vec!["Michigan".to_string(), "Ann Arbor".to_string()]);
}

#[test]
fn load_csv_from_disk_matches_in_memory_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gdplev.csv");
    std::fs::write(&path, gdp_fixture()).unwrap();

    let from_disk = load_csv(&path, &gdp_schema()).unwrap();
    let from_memory = load_reader(gdp_fixture().as_bytes(), &gdp_schema()).unwrap();
    assert_eq!(from_disk, from_memory);
}
