use std::process::ExitCode;

use clap::Parser;
use sfv_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging before any work; stderr if the state dir is unusable.
    let verbosity = cli.verbosity();
    if let Err(err) = logging::init_logging(verbosity) {
        logging::init_logging_stderr(verbosity);
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    match cli.run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("sfv error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
