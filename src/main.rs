use clap::Parser;
use omop_duckdb_loader::cli::Cli;
use omop_duckdb_loader::duckdb_load::{load_all, prompt_for_mode};
use omop_duckdb_loader::logging;
use std::io;
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_format);

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let mode = match cli.mode {
        Some(mode) => mode,
        None => match prompt_for_mode(io::stdin().lock(), io::stdout()) {
            Ok(mode) => mode,
            Err(e) => {
                error!(error = %e, "No write mode selected");
                return ExitCode::FAILURE;
            }
        },
    };

    info!(%mode, schema = %config.schema_name, "Starting OMOP CSV load");
    match load_all(config, mode) {
        Ok(report) => {
            info!(
                tables = report.tables_loaded().len(),
                shards = report.loaded.len(),
                "OMOP CSV load finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Load failed");
            ExitCode::FAILURE
        }
    }
}
