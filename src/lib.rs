//! Bulk-load sharded OMOP CDM CSV extracts (`{table}_{n}.csv`) into a
//! DuckDB schema, either replacing or appending to each table.

pub mod cli;
pub mod config;
pub mod duckdb_load;
pub mod error;
pub mod file_load;
pub mod logging;

pub use config::LoadConfig;
pub use duckdb_load::{load_all, CoreLoader, LoadReport, OverwritePolicy, WriteMode};
pub use error::{ConfigError, LoadError, Result};
