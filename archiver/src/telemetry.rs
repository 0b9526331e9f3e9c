//! Logging setup driven by the `LOG_LEVEL` environment variable.

use tracing_subscriber::EnvFilter;

/// Variable holding the log level (`DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL`).
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Translate a `LOG_LEVEL` value into an `EnvFilter` directive.
///
/// Level names are case-insensitive. Anything that is not a level name is
/// passed through as a raw directive.
pub fn filter_directive(raw: Option<&str>) -> String {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return "info".to_string();
    }

    match raw.to_ascii_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" => "error".to_string(),
        level @ ("trace" | "debug" | "info" | "warn" | "error" | "off") => level.to_string(),
        _ => raw.to_string(),
    }
}

/// Install the process-wide subscriber. Logs go to stderr so stdout stays
/// free for the JSON summary.
pub fn init() {
    let directive = filter_directive(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
