use crate::duckdb_load::core_loader::CoreLoader;
use crate::duckdb_load::load_processor::LoadProcessor;
use crate::error::{LoadError, Result};
use crate::file_load::ShardFile;

/// Strategy for append runs.
/// Append never creates a table, so the target must already exist from an
/// earlier overwrite run.
pub struct AppendStrategy;

impl AppendStrategy {
    pub fn insert_sql(qualified_table: &str, source: &str) -> String {
        format!("INSERT INTO {} SELECT * FROM {};", qualified_table, source)
    }
}

impl LoadProcessor for AppendStrategy {
    fn load_shard(&self, core: &CoreLoader, shard: &ShardFile, _first_of_table: bool) -> Result<()> {
        let qualified_table = core.qualified_table(shard.table());
        if !core.table_exists(shard.table())? {
            return Err(LoadError::MissingAppendTarget {
                table: qualified_table,
            });
        }

        let source = CoreLoader::csv_source(shard.path())?;
        core.conn()
            .execute(&Self::insert_sql(&qualified_table, &source), [])?;
        Ok(())
    }
}
