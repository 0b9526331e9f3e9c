//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::api::{DEFAULT_PAGE_LIMIT, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};
use crate::db::DEFAULT_DB_PATH;

/// Asset archiver - mark stale inventory assets archived
#[derive(Parser, Debug)]
#[command(name = "asset-archiver")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Core IP address or FQDN
    #[arg(long)]
    pub address: String,

    /// Public API port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// API token
    #[arg(long)]
    pub token: String,

    /// Archive assets not updated for at least this many days
    #[arg(long = "days_to_archive", default_value_t = 30)]
    pub days_to_archive: u32,

    /// Local state database
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    // === Connection Options ===
    /// Records per page when listing tenants and assets
    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
    pub page_limit: usize,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Verify the server's TLS certificate
    #[arg(long)]
    pub verify_tls: bool,

    // === Run Options ===
    /// Also push the archived flag to the server, one import per tenant
    #[arg(long)]
    pub import: bool,

    /// Classify and report only; change nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
