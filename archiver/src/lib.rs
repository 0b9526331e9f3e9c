//! Archive stale inventory assets.
//!
//! Pages through every asset of the management API, selects the ones not
//! updated for a configurable number of days, optionally pushes the archived
//! flag back per tenant, and marks them archived in the core's local `SQLite`
//! state database.

pub mod api;
pub mod archive;
pub mod cli;
pub mod db;
pub mod error;
pub mod models;
pub mod telemetry;

pub use error::{ArchiverError, RequestResult, Result, Status};
