//! suitestream: stream test-discovery trees one source file at a time
//!
//! Reads discovery events and writes compressed per-file chunks, or merges
//! chunks back into a single tree. Logs go to stderr; stdout carries data.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use suitestream::config::Config;
use suitestream::run;

fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize tracing subscriber on stderr so chunks own stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    match run::execute(&config, std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
