mod cli;
mod config;
mod logging;
mod progress;
mod run;

use std::process::ExitCode;

use checker_logging::checker_error;
use clap::Parser;

use crate::cli::Cli;
use crate::logging::LogDestination;
use crate::run::AppError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(
        LogDestination::from_log_file(cli.log_file.clone()),
        checker_logging::level_for_verbosity(cli.verbose),
    );

    let result = config::resolve(&cli)
        .map_err(AppError::Config)
        .and_then(|config| run::run(&config));

    match result {
        Ok(_) => {
            println!("\nValidation complete.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            checker_error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::from(err.exit_code())
        }
    }
}
