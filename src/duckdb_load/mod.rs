//! DuckDB side of the loader: connection ownership, write strategies and
//! write-mode selection.

pub mod append_strategy;
pub mod core_loader;
pub mod load_processor;
pub mod overwrite_strategy;
pub mod write_mode;

pub use core_loader::{load_all, CoreLoader, LoadReport, LoadedShard};
pub use write_mode::{prompt_for_mode, OverwritePolicy, WriteMode};
