//! RecessLab Core — domain types and the data-transformation pipeline stages.
//!
//! This crate contains the leaf components of the recession analysis:
//! - Domain types (tables with typed column metadata, quarter labels,
//!   contiguous quarterly series)
//! - Declarative load schemas and the CSV table loader
//! - Fetch-if-missing URL cache for remote sources
//! - Monthly-to-quarterly mean aggregation
//! - Recession window detection over a GDP series
//!
//! Everything here is synchronous and single-threaded; the only I/O is the
//! initial source read (and the optional URL fetch in `data::fetch`).

pub mod aggregate;
pub mod data;
pub mod domain;
pub mod recession;

pub use aggregate::{aggregate, AggregateError, QuarterWindows};
pub use data::{fetch_cached, load_csv, load_reader, LoadError, SchemaError, TableSchema};
pub use domain::{Column, ColumnMeta, QuarterLabel, QuarterSeries, RowKey, SeriesError, Table};
pub use recession::{find_window, RecessionError, RecessionWindow};
