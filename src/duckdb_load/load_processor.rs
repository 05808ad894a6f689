use crate::duckdb_load::core_loader::CoreLoader;
use crate::error::Result;
use crate::file_load::ShardFile;

/// Strategy trait for writing one shard into its table.
/// Each `WriteMode` has its own implementation.
pub trait LoadProcessor {
    /// Load `shard` into its table. `first_of_table` is true for the first
    /// shard of a table that this run actually loads.
    fn load_shard(&self, core: &CoreLoader, shard: &ShardFile, first_of_table: bool) -> Result<()>;
}
