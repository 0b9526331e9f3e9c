//! Database module for `SQLite` operations.

mod connection;
mod queries;

pub use connection::{mark_archived, Database, DEFAULT_DB_PATH};
pub use queries::{AssetQueries, MarkReport, MAX_SQL_PARAMS};
