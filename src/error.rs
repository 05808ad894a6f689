use thiserror::Error;

/// Errors raised while reading or validating the loader configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] duckdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot append into {table}: table does not exist (run in overwrite mode first)")]
    MissingAppendTarget { table: String },

    #[error("shard path is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: std::path::PathBuf },

    #[error("invalid write mode '{0}': expected \"overwrite\" or \"append\"")]
    InvalidMode(String),

    #[error("no write mode supplied before end of input")]
    NoModeSupplied,
}

pub type Result<T, E = LoadError> = std::result::Result<T, E>;
