//! Domain types: quarter labels, columnar tables, quarterly series.

pub mod quarter;
pub mod series;
pub mod table;

pub use quarter::{ParseQuarterError, QuarterLabel};
pub use series::{QuarterSeries, SeriesError};
pub use table::{Column, ColumnData, ColumnMeta, RowKey, Table, TableError};
