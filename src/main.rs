use std::process::ExitCode;

use site_assembler::config::Mode;
use site_assembler::{Config, logging, run};
use tracing::error;

fn main() -> ExitCode {
    let config = match Config::from_cli() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = logging::init(config.verbosity) {
        eprintln!("Failed to initialise logging: {err}");
    }

    match run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            match config.mode {
                Mode::Build => error!("Error assembling site: {err}"),
                Mode::Check => error!("Check failed: {err}"),
            }
            ExitCode::FAILURE
        }
    }
}
