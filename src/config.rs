//! Loader configuration.
//!
//! Values come from three layers: built-in defaults, an optional TOML file,
//! and command-line overrides applied by the binary.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::duckdb_load::write_mode::OverwritePolicy;
use crate::error::ConfigError;

/// The OMOP CDM domains produced by the SynPUF ETL, in load order.
pub const DEFAULT_TABLES: [&str; 19] = [
    "care_site",
    "condition_occurrence",
    "death",
    "device_cost",
    "device_exposure",
    "drug_cost",
    "drug_exposure",
    "location",
    "measurement_occurrence",
    "observation_period",
    "observation",
    "payer_plan_period",
    "person",
    "procedure_cost",
    "procedure_occurrence",
    "provider",
    "specimen",
    "visit_cost",
    "visit_occurrence",
];

pub const DEFAULT_SHARD_COUNT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    pub database_path: PathBuf,
    pub schema_name: String,
    pub base_dir: PathBuf,
    pub shard_count: u32,
    pub overwrite_policy: OverwritePolicy,
    pub tables: Vec<String>,
}

impl LoadConfig {
    /// Read and validate a TOML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config = Self::from_toml_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schema_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "schema_name",
                reason: "cannot be empty".into(),
            });
        }
        if self.shard_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "shard_count",
                reason: "must be at least 1".into(),
            });
        }
        if self.tables.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "tables",
                reason: "at least one table is required".into(),
            });
        }
        // Table names double as file name prefixes.
        if let Some(bad) = self
            .tables
            .iter()
            .find(|t| t.trim().is_empty() || t.contains(['/', '\\']))
        {
            return Err(ConfigError::InvalidValue {
                field: "tables",
                reason: format!("'{}' is not a usable table name", bad),
            });
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.tables.iter().find(|t| !seen.insert(*t)) {
            return Err(ConfigError::InvalidValue {
                field: "tables",
                reason: format!("'{}' is listed more than once", dup),
            });
        }
        Ok(())
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/omop.db"),
            schema_name: "synpuf".into(),
            base_dir: PathBuf::from("data/BASE_OUTPUT_DIRECTORY"),
            shard_count: DEFAULT_SHARD_COUNT,
            overwrite_policy: OverwritePolicy::default(),
            tables: DEFAULT_TABLES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_domains() {
        let config = LoadConfig::default();
        assert_eq!(config.tables.len(), 19);
        assert_eq!(config.shard_count, 20);
        assert_eq!(config.schema_name, "synpuf");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = LoadConfig::from_toml_str(
            r#"
            schema_name = "cdm"
            shard_count = 2
            tables = ["person", "death"]
            overwrite_policy = "replace-first-shard"
            "#,
        )
        .unwrap();

        assert_eq!(config.schema_name, "cdm");
        assert_eq!(config.shard_count, 2);
        assert_eq!(config.tables, vec!["person", "death"]);
        assert_eq!(config.overwrite_policy, OverwritePolicy::ReplaceFirstShard);
        assert_eq!(config.database_path, PathBuf::from("data/omop.db"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = LoadConfig::from_toml_str("shards = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let config = LoadConfig {
            shard_count: 0,
            ..LoadConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "shard_count", .. })
        ));

        let config = LoadConfig {
            tables: vec![],
            ..LoadConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "tables", .. })
        ));

        let config = LoadConfig {
            tables: vec!["../person".into()],
            ..LoadConfig::default()
        };
        assert!(config.validate().is_err());

        let config = LoadConfig {
            schema_name: "  ".into(),
            ..LoadConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "schema_name", .. })
        ));
    }

    #[test]
    fn duplicate_tables_are_rejected() {
        let config = LoadConfig {
            tables: vec!["person".into(), "death".into(), "person".into()],
            ..LoadConfig::default()
        };
        match config.validate() {
            Err(ConfigError::InvalidValue { field, reason }) => {
                assert_eq!(field, "tables");
                assert!(reason.contains("person"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn load_reports_missing_file() {
        let err = LoadConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile(_)));
    }
}
