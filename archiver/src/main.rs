//! Asset archiver CLI.

use std::process::ExitCode;

use asset_archiver::cli::{execute, usage_status, Cli, EXIT_FAILURE};
use asset_archiver::telemetry;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_status(&e));
        }
    };

    match execute(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
