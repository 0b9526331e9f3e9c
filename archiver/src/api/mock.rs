//! Scripted in-memory transport for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::transport::{Query, Transport};
use crate::error::{ArchiverError, Result};

/// A request the mock received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub endpoint: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

struct PagedRoute {
    records: Vec<Value>,
    limit: usize,
}

/// Mock transport that serves paged record sets and fixed responses.
#[derive(Default)]
pub struct MockTransport {
    paged: HashMap<String, PagedRoute>,
    fixed: HashMap<String, std::result::Result<Value, String>>,
    failing_pages: HashMap<(String, usize), String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `records` from `endpoint`, `limit` per page, honoring the
    /// `page` query parameter.
    pub fn with_records(mut self, endpoint: &str, records: Vec<Value>, limit: usize) -> Self {
        self.paged
            .insert(endpoint.to_string(), PagedRoute { records, limit });
        self
    }

    /// Fail a specific page of a paged endpoint.
    pub fn fail_page(mut self, endpoint: &str, page: usize, detail: &str) -> Self {
        self.failing_pages
            .insert((endpoint.to_string(), page), detail.to_string());
        self
    }

    /// Answer every request to `endpoint` with `body`.
    pub fn respond(mut self, endpoint: &str, body: Value) -> Self {
        self.fixed.insert(endpoint.to_string(), Ok(body));
        self
    }

    /// Fail every request to `endpoint`.
    pub fn fail(mut self, endpoint: &str, detail: &str) -> Self {
        self.fixed
            .insert(endpoint.to_string(), Err(detail.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, endpoint: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.endpoint == endpoint)
            .count()
    }

    fn record(&self, request: RecordedRequest) {
        self.requests.lock().unwrap().push(request);
    }

    fn answer(&self, endpoint: &str, page: Option<usize>) -> Result<Value> {
        if let Some(page) = page {
            if let Some(detail) = self.failing_pages.get(&(endpoint.to_string(), page)) {
                return Err(ArchiverError::Transport(detail.clone()));
            }
            if let Some(route) = self.paged.get(endpoint) {
                let start = page.saturating_sub(1) * route.limit;
                let slice: Vec<Value> = route
                    .records
                    .iter()
                    .skip(start)
                    .take(route.limit)
                    .cloned()
                    .collect();
                return Ok(Value::Array(slice));
            }
        }

        match self.fixed.get(endpoint) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(detail)) => Err(ArchiverError::Transport(detail.clone())),
            None => Err(ArchiverError::Transport(format!(
                "no response scripted for {endpoint}"
            ))),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, endpoint: &str, query: &Query) -> Result<Value> {
        let query: Vec<(String, String)> = query
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        let page = query
            .iter()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.parse().ok());

        self.record(RecordedRequest {
            method: "GET",
            endpoint: endpoint.to_string(),
            query,
            body: None,
        });
        self.answer(endpoint, page)
    }

    async fn post(&self, endpoint: &str, body: &Value) -> Result<Value> {
        self.record(RecordedRequest {
            method: "POST",
            endpoint: endpoint.to_string(),
            query: Vec::new(),
            body: Some(body.clone()),
        });
        self.answer(endpoint, None)
    }
}
