//! Page-by-page traversal of list endpoints.
//!
//! The API has no cursor or total count: a page holding exactly `limit`
//! records means more may follow, anything shorter is the last page. When the
//! total is an exact multiple of the limit, one extra request returning an
//! empty page ends the traversal. An empty page always ends it, whatever the
//! limit.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::transport::{Query, Transport};
use crate::error::{ArchiverError, RequestResult, Result};

/// Records gathered by [`Paginator::fetch_all`] and how the traversal ended.
#[derive(Debug)]
pub struct Fetched<R> {
    /// Every record received, in fetch order, including pages fetched before
    /// a failure.
    pub records: Vec<R>,
    /// Number of requests issued.
    pub requests: usize,
    /// The failure that stopped the traversal, if any.
    pub error: Option<ArchiverError>,
}

impl<R> Fetched<R> {
    pub fn result(&self) -> RequestResult {
        self.error.as_ref().map_or_else(RequestResult::ok, RequestResult::from)
    }

    /// Discard partial records if the traversal failed.
    pub fn into_result(self) -> Result<Vec<R>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.records),
        }
    }
}

/// Fetches every page of a list endpoint.
pub struct Paginator<'a, T: ?Sized> {
    transport: &'a T,
    limit: usize,
}

impl<'a, T: Transport + ?Sized> Paginator<'a, T> {
    pub const fn new(transport: &'a T, limit: usize) -> Self {
        Self { transport, limit }
    }

    /// Request pages 1, 2, ... of `endpoint` with `filters` merged into each
    /// query until a short page arrives or a request fails.
    pub async fn fetch_all<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        filters: &Query,
    ) -> Fetched<R> {
        let mut fetched = Fetched {
            records: Vec::new(),
            requests: 0,
            error: None,
        };
        let mut page = 1usize;

        loop {
            let mut query: Query = Vec::with_capacity(filters.len() + 1);
            query.push(("page", page.to_string()));
            query.extend(filters.iter().cloned());

            fetched.requests += 1;
            let batch = match self.transport.get(endpoint, &query).await {
                Ok(body) => parse_page::<R>(body),
                Err(e) => Err(e),
            };

            let batch = match batch {
                Ok(batch) => batch,
                Err(e) => {
                    warn!(endpoint, page, error = %e, "pagination stopped");
                    fetched.error = Some(e);
                    return fetched;
                }
            };

            let count = batch.len();
            debug!(endpoint, page, count, "fetched page");
            fetched.records.extend(batch);

            if count == 0 || count != self.limit {
                return fetched;
            }
            page += 1;
        }
    }
}

fn parse_page<R: DeserializeOwned>(body: Value) -> Result<Vec<R>> {
    if body.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(body).map_err(|e| ArchiverError::Parse(format!("invalid page: {e}")))
}
