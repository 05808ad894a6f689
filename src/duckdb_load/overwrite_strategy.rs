use tracing::warn;

use crate::duckdb_load::append_strategy::AppendStrategy;
use crate::duckdb_load::core_loader::CoreLoader;
use crate::duckdb_load::load_processor::LoadProcessor;
use crate::duckdb_load::write_mode::OverwritePolicy;
use crate::error::Result;
use crate::file_load::ShardFile;

/// Strategy for overwrite runs
pub struct OverwriteStrategy {
    policy: OverwritePolicy,
}

impl OverwriteStrategy {
    pub fn new(policy: OverwritePolicy) -> Self {
        Self { policy }
    }

    pub fn replace_sql(qualified_table: &str, source: &str) -> String {
        format!(
            "CREATE OR REPLACE TABLE {} AS SELECT * FROM {};",
            qualified_table, source
        )
    }

    // Statement for one shard, and whether it throws away rows an earlier
    // shard of the same table loaded in this run
    pub fn shard_sql(&self, qualified_table: &str, source: &str, first_of_table: bool) -> (String, bool) {
        match self.policy {
            _ if first_of_table => (Self::replace_sql(qualified_table, source), false),
            OverwritePolicy::ReplaceFirstShard => {
                (AppendStrategy::insert_sql(qualified_table, source), false)
            }
            OverwritePolicy::ReplaceEachShard => (Self::replace_sql(qualified_table, source), true),
        }
    }
}

impl LoadProcessor for OverwriteStrategy {
    fn load_shard(&self, core: &CoreLoader, shard: &ShardFile, first_of_table: bool) -> Result<()> {
        let qualified_table = core.qualified_table(shard.table());
        let source = CoreLoader::csv_source(shard.path())?;

        let (query, discards_earlier_shard) =
            self.shard_sql(&qualified_table, &source, first_of_table);
        if discards_earlier_shard {
            warn!(
                table = shard.table(),
                shard = shard.index(),
                "Replacing rows loaded from an earlier shard of this table"
            );
        }

        core.conn().execute(&query, [])?;

        if first_of_table {
            core.log_table_schema(shard.table())?;
        }
        Ok(())
    }
}
