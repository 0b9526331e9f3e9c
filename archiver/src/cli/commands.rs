//! CLI command execution.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::error::ErrorKind;
use tracing::info;

use super::args::Cli;
use crate::api::{KumaClient, Session};
use crate::archive::{ArchiveCoordinator, ArchiveOptions, RunStep, RunSummary};

/// Run completed; classification or import errors may still be in the summary.
pub const EXIT_OK: u8 = 0;
/// Bad configuration, failed connectivity check, or failed inventory fetch.
pub const EXIT_FAILURE: u8 = 1;
/// The local database update failed.
pub const EXIT_LOCAL_UPDATE_FAILED: u8 = 2;

impl From<&Cli> for ArchiveOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            threshold_days: cli.days_to_archive,
            import: cli.import,
            dry_run: cli.dry_run,
            db_path: cli.db.clone(),
        }
    }
}

/// Build a session from the arguments.
pub fn session_from(cli: &Cli) -> Result<Session> {
    let session = Session::new(&cli.address, cli.port, &cli.token)?
        .with_page_limit(cli.page_limit)?
        .with_verify_tls(cli.verify_tls)
        .with_timeout(Duration::from_secs(cli.timeout));
    Ok(session)
}

/// Process exit status when the arguments don't parse. Help and version
/// output is a success; every other usage error is a configuration failure.
pub fn usage_status(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => EXIT_OK,
        _ => EXIT_FAILURE,
    }
}

/// Process exit status for a finished run.
pub fn exit_status(summary: &RunSummary) -> u8 {
    if summary.failed(RunStep::LocalUpdate) {
        EXIT_LOCAL_UPDATE_FAILED
    } else {
        EXIT_OK
    }
}

// === Command Execution ===

pub async fn execute(cli: Cli) -> Result<u8> {
    info!(
        address = %cli.address,
        port = cli.port,
        days_to_archive = cli.days_to_archive,
        db = %cli.db.display(),
        import = cli.import,
        dry_run = cli.dry_run,
        "starting archiver"
    );

    let session = session_from(&cli).context("invalid connection settings")?;
    info!(
        base_url = session.base_url(),
        verify_tls = session.verify_tls(),
        page_limit = session.page_limit(),
        "session ready"
    );
    let client = KumaClient::new(session).context("failed to set up API client")?;

    let now = Utc::now();
    let summary = ArchiveCoordinator::new(&client, client.session(), ArchiveOptions::from(&cli))
        .run(now)
        .await
        .context("archive run aborted")?;

    summary.log();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(exit_status(&summary))
}
