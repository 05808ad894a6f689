//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

use crate::config::LoadConfig;
use crate::duckdb_load::write_mode::{OverwritePolicy, WriteMode};
use crate::error::ConfigError;
use crate::logging::LogFormat;

/// Load sharded OMOP CSV extracts into a DuckDB schema.
#[derive(Parser, Debug)]
#[command(name = "omop-duckdb-loader")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Write mode for every table. Prompts on stdin when omitted
    #[arg(value_enum)]
    pub mode: Option<WriteMode>,

    /// TOML config file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// DuckDB database file
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Directory holding the `{table}_{n}.csv` shards
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Target schema
    #[arg(long)]
    pub schema: Option<String>,

    /// Highest shard index to look for
    #[arg(long)]
    pub shards: Option<u32>,

    /// Comma-separated table list replacing the built-in OMOP domains
    #[arg(long, value_delimiter = ',')]
    pub tables: Option<Vec<String>>,

    /// How overwrite mode treats the second and later shards of a table
    #[arg(long, value_enum)]
    pub overwrite_policy: Option<OverwritePolicy>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Build the effective config: defaults, then the config file, then flags.
    pub fn resolve_config(&self) -> Result<LoadConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => LoadConfig::load(path)?,
            None => LoadConfig::default(),
        };

        if let Some(database) = &self.database {
            config.database_path = database.clone();
        }
        if let Some(base_dir) = &self.base_dir {
            config.base_dir = base_dir.clone();
        }
        if let Some(schema) = &self.schema {
            config.schema_name = schema.clone();
        }
        if let Some(shards) = self.shards {
            config.shard_count = shards;
        }
        if let Some(tables) = &self.tables {
            config.tables = tables.clone();
        }
        if let Some(policy) = self.overwrite_policy {
            config.overwrite_policy = policy;
        }

        config.validate()?;
        Ok(config)
    }
}
