//! Database connection management.

use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use super::queries::{AssetQueries, MarkReport};
use crate::error::{ArchiverError, Result};

/// Default location of the core's state database.
pub const DEFAULT_DB_PATH: &str =
    "/opt/kaspersky/kuma/core/00000000-0000-0000-0000-000000000000/raft/sm/db";

/// Handle on the local state database. The connection closes when this is dropped.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open an existing database. The `assets` table is owned by the core, so
    /// a missing file is an error rather than a fresh empty database.
    pub fn open_at(path: &Path) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|e| {
            ArchiverError::Database(format!(
                "failed to open database at {}: {e}",
                path.display()
            ))
        })?;

        Ok(Self { conn })
    }

    /// Set `archived = 1` for every id, in one transaction.
    pub fn mark_archived(&mut self, ids: &[String]) -> Result<MarkReport> {
        AssetQueries::mark_archived(&mut self.conn, ids)
    }

    /// Get a reference to the connection.
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Open the database at `path`, archive `ids`, and close it again.
pub fn mark_archived(path: &Path, ids: &[String]) -> Result<MarkReport> {
    let mut db = Database::open_at(path)?;
    db.mark_archived(ids)
}
