//! Data layer: declarative schemas, CSV loading, cached URL fetching.

pub mod fetch;
pub mod loader;
pub mod schema;
pub mod sources;

pub use fetch::{fetch_cached, http_client, FetchError};
pub use loader::{load_csv, load_reader, LoadError};
pub use schema::{ColumnKind, ColumnSpec, HeaderRule, SchemaError, TableSchema};
pub use sources::DatasetSource;
