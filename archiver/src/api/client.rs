//! reqwest-backed transport.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;

use super::session::Session;
use super::transport::{Query, Transport};
use crate::error::{ArchiverError, Result};

/// HTTP client for the management API.
pub struct KumaClient {
    http: reqwest::Client,
    session: Session,
}

impl KumaClient {
    /// Build the underlying HTTP client from the session's TLS and timeout settings.
    pub fn new(session: Session) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(session.timeout())
            .danger_accept_invalid_certs(!session.verify_tls())
            .build()
            .map_err(|e| ArchiverError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, session })
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.bearer_auth(self.session.token()).send().await?;
        Self::read_body(response).await
    }

    async fn read_body(response: Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ArchiverError::Transport(format!(
                "Status code: {}. Details: {text}",
                status.as_u16()
            )));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| ArchiverError::Parse(format!("invalid response body: {e}")))
    }
}

#[async_trait]
impl Transport for KumaClient {
    async fn get(&self, endpoint: &str, query: &Query) -> Result<Value> {
        let url = self.session.url(endpoint);
        debug!(%url, ?query, "GET");
        self.send(self.http.get(&url).query(query)).await
    }

    async fn post(&self, endpoint: &str, body: &Value) -> Result<Value> {
        let url = self.session.url(endpoint);
        debug!(%url, "POST");
        self.send(self.http.post(&url).json(body)).await
    }
}
