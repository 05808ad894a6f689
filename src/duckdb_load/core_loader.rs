use duckdb::arrow::datatypes::Schema;
use duckdb::{params, Connection};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::LoadConfig;
use crate::duckdb_load::append_strategy::AppendStrategy;
use crate::duckdb_load::load_processor::LoadProcessor;
use crate::duckdb_load::overwrite_strategy::OverwriteStrategy;
use crate::duckdb_load::write_mode::WriteMode;
use crate::error::{LoadError, Result};
use crate::file_load::{shard_files, ShardFile};

// A shard that was written, with the table's row count right after the load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedShard {
    pub table: String,
    pub index: u32,
    pub path: PathBuf,
    pub table_rows: i64,
}

/// Outcome of one run over every (table, shard) pair.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: Vec<LoadedShard>,
    pub skipped: Vec<ShardFile>,
}

impl LoadReport {
    pub fn was_loaded(&self, table: &str, index: u32) -> bool {
        self.loaded
            .iter()
            .any(|s| s.table == table && s.index == index)
    }

    pub fn tables_loaded(&self) -> Vec<&str> {
        let mut tables: Vec<&str> = self.loaded.iter().map(|s| s.table.as_str()).collect();
        tables.dedup();
        tables
    }
}

// The CoreLoader owns the single DuckDB connection for the run.
// It creates the schema, walks the table x shard grid, and hands each
// existing shard to the strategy for the chosen write mode.
// Dropping it (including on an error path) closes the connection.
pub struct CoreLoader {
    conn: Connection,
    config: LoadConfig,
}

impl CoreLoader {
    /// Open the on-disk database named in `config`.
    pub fn open(config: LoadConfig) -> Result<Self> {
        config.validate()?;
        let conn = Connection::open(&config.database_path)?;
        info!(path = %config.database_path.display(), "Database connection established.");
        Ok(Self { conn, config })
    }

    /// Wrap an already open connection, e.g. an in-memory database.
    pub fn with_connection(conn: Connection, config: LoadConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { conn, config })
    }

    pub fn create_schema(&self) -> Result<()> {
        let query = format!(
            "CREATE SCHEMA IF NOT EXISTS {};",
            quote_identifier(&self.config.schema_name)
        );
        self.conn.execute(&query, [])?;
        Ok(())
    }

    pub fn qualified_table(&self, table: &str) -> String {
        format!(
            "{}.{}",
            quote_identifier(&self.config.schema_name),
            quote_identifier(table)
        )
    }

    // Table function reading one CSV shard, skipping rows that fail to parse
    pub fn csv_source(path: &Path) -> Result<String> {
        let path_str = path.to_str().ok_or_else(|| LoadError::NonUtf8Path {
            path: path.to_path_buf(),
        })?;
        Ok(format!(
            "read_csv_auto({}, ignore_errors = true)",
            quote_literal(path_str)
        ))
    }

    pub fn table_exists(&self, table: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT count(*) FROM information_schema.tables
             WHERE table_schema = ? AND table_name = ?",
            params![self.config.schema_name, table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn row_count(&self, table: &str) -> Result<i64> {
        let query = format!("SELECT count(*) FROM {};", self.qualified_table(table));
        let count = self.conn.query_row(&query, [], |row| row.get(0))?;
        Ok(count)
    }

    // Query the table and log the inferred column layout
    pub fn log_table_schema(&self, table: &str) -> Result<Arc<Schema>> {
        let query = format!("SELECT * FROM {} LIMIT 0", self.qualified_table(table));
        let mut stmt = self.conn.prepare(&query)?;
        let arrow_result = stmt.query_arrow([])?;
        let schema = arrow_result.get_schema();
        debug!(table, schema = ?schema, "Inferred table schema");
        Ok(schema)
    }

    /// Run one load pass over every configured table and shard.
    pub fn run(&self, mode: WriteMode) -> Result<LoadReport> {
        self.create_schema()?;

        let strategy: Box<dyn LoadProcessor> = match mode {
            WriteMode::Overwrite => Box::new(OverwriteStrategy::new(self.config.overwrite_policy)),
            WriteMode::Append => Box::new(AppendStrategy),
        };

        let mut report = LoadReport::default();
        for table in &self.config.tables {
            let mut first_of_table = true;

            for shard in shard_files(&self.config.base_dir, table, self.config.shard_count) {
                if !shard.is_loadable() {
                    info!("File {} not found or is not a csv file.", shard.file_name());
                    report.skipped.push(shard);
                    continue;
                }

                info!(shard = shard.index(), %mode, "Updating table: {}...", table);
                strategy.load_shard(self, &shard, first_of_table)?;
                first_of_table = false;

                let table_rows = self.row_count(table)?;
                info!(shard = shard.index(), rows = table_rows, "Table {} updated.", table);

                report.loaded.push(LoadedShard {
                    table: table.clone(),
                    index: shard.index(),
                    path: shard.path().to_path_buf(),
                    table_rows,
                });
            }
        }

        Ok(report)
    }

    /// Close the connection, surfacing any error from the close itself.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        info!("Database connection closed.");
        Ok(())
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Open the database, run a single load pass and close the connection.
pub fn load_all(config: LoadConfig, mode: WriteMode) -> Result<LoadReport> {
    let loader = CoreLoader::open(config)?;
    let report = loader.run(mode)?;
    loader.close()?;

    info!(
        loaded = report.loaded.len(),
        skipped = report.skipped.len(),
        "Load finished"
    );
    Ok(report)
}
