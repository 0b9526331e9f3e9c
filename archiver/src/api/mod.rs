//! Management API access: session, transport, pagination, typed operations.

mod client;
mod kuma;
mod paginator;
mod session;
mod transport;

#[cfg(test)]
pub mod mock;

pub use client::KumaClient;
pub use kuma::KumaApi;
pub use paginator::{Fetched, Paginator};
pub use session::{Session, DEFAULT_PAGE_LIMIT, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};
pub use transport::{Query, Transport};
