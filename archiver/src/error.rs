//! Error taxonomy and per-call outcome type.

use serde::Serialize;
use thiserror::Error;

/// Errors raised while talking to the management API or the local database.
#[derive(Debug, Error)]
pub enum ArchiverError {
    /// Network failure, timeout, or a non-2xx HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// Malformed timestamp or response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// Failure opening the database, running a statement, or committing.
    #[error("database error: {0}")]
    Database(String),

    /// Missing or invalid configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ArchiverError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ArchiverError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<chrono::ParseError> for ArchiverError {
    fn from(e: chrono::ParseError) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<rusqlite::Error> for ArchiverError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ArchiverError>;

/// Status of a single remote or local call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one call: a status plus a detail string that is only ever
/// present on `ERROR`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestResult {
    status: Status,
    details: Option<String>,
}

impl RequestResult {
    pub const fn ok() -> Self {
        Self {
            status: Status::Ok,
            details: None,
        }
    }

    pub fn error(details: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            details: Some(details.into()),
        }
    }

    pub const fn status(&self) -> Status {
        self.status
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

impl From<&ArchiverError> for RequestResult {
    fn from(e: &ArchiverError) -> Self {
        Self::error(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_carries_no_details() {
        let result = RequestResult::ok();
        assert!(result.is_ok());
        assert_eq!(result.details(), None);
    }

    #[test]
    fn error_keeps_kind_and_detail() {
        let err = ArchiverError::Transport("Status code: 401. Details: denied".into());
        let result = RequestResult::from(&err);
        assert_eq!(result.status(), Status::Error);
        assert_eq!(
            result.details(),
            Some("transport error: Status code: 401. Details: denied")
        );
    }

    #[test]
    fn status_serializes_uppercase() {
        let json = serde_json::to_string(&RequestResult::error("boom")).unwrap();
        assert_eq!(json, r#"{"status":"ERROR","details":"boom"}"#);
    }
}
