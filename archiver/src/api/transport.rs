//! The seam between the archiver and the HTTP stack.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Query-string pairs for a GET request.
pub type Query = Vec<(&'static str, String)>;

/// Authenticated request/response against the management API.
///
/// Endpoints are relative to the session base URL (e.g. `/assets`).
/// A successful call yields the parsed JSON body (`Value::Null` for an empty
/// body); any network failure, timeout, or non-2xx status is an
/// `ArchiverError::Transport`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, endpoint: &str, query: &Query) -> Result<Value>;

    async fn post(&self, endpoint: &str, body: &Value) -> Result<Value>;
}
