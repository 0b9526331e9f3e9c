//! Connection parameters shared by every API call.

use std::time::Duration;

use crate::error::{ArchiverError, Result};

/// Path prefix of the public REST API.
pub const API_VERSION: &str = "/api/v3";

/// Default public API port.
pub const DEFAULT_PORT: u16 = 7223;

/// Records requested per page for every paginated resource.
pub const DEFAULT_PAGE_LIMIT: usize = 250;

/// Per-request HTTP timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Immutable connection settings, created once at startup.
#[derive(Clone)]
pub struct Session {
    base_url: String,
    token: String,
    verify_tls: bool,
    page_limit: usize,
    timeout: Duration,
}

impl Session {
    /// Build a session for `https://{address}:{port}/api/v3`.
    pub fn new(address: &str, port: u16, token: &str) -> Result<Self> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ArchiverError::Config("address is required".into()));
        }
        if token.trim().is_empty() {
            return Err(ArchiverError::Config("token is required".into()));
        }

        Ok(Self {
            base_url: format!("https://{address}:{port}{API_VERSION}"),
            token: token.trim().to_string(),
            verify_tls: false,
            page_limit: DEFAULT_PAGE_LIMIT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Enable or disable TLS certificate verification.
    #[must_use]
    pub const fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Set the page size. Zero would make pagination meaningless.
    pub fn with_page_limit(mut self, limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(ArchiverError::Config(
                "page limit must be greater than zero".into(),
            ));
        }
        self.page_limit = limit;
        Ok(self)
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute URL for an endpoint such as `/assets`.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub const fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    pub const fn page_limit(&self) -> usize {
        self.page_limit
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("verify_tls", &self.verify_tls)
            .field("page_limit", &self.page_limit)
            .field("timeout", &self.timeout)
            .finish()
    }
}
