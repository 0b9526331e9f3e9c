//! Database query implementations.

use rusqlite::{params_from_iter, Connection, TransactionBehavior};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// SQLite's default ceiling on bound parameters per statement.
pub const MAX_SQL_PARAMS: usize = 999;

/// What a batched update did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MarkReport {
    /// `UPDATE` statements executed.
    pub statements: usize,
    /// Rows the statements changed.
    pub updated: usize,
}

/// Queries for the assets table.
pub struct AssetQueries;

impl AssetQueries {
    /// Mark assets archived in chunks of at most [`MAX_SQL_PARAMS`] ids.
    pub fn mark_archived(conn: &mut Connection, ids: &[String]) -> Result<MarkReport> {
        Self::mark_archived_chunked(conn, ids, MAX_SQL_PARAMS)
    }

    /// Mark assets archived in chunks of at most `chunk_size` ids.
    ///
    /// All chunks run inside one transaction: either every chunk is committed
    /// or, if any statement fails, none is.
    pub fn mark_archived_chunked(
        conn: &mut Connection,
        ids: &[String],
        chunk_size: usize,
    ) -> Result<MarkReport> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut report = MarkReport::default();

        for chunk in ids.chunks(chunk_size.max(1)) {
            let sql = format!(
                "UPDATE assets SET archived = 1 WHERE id IN ({})",
                placeholders(chunk.len())
            );
            let mut stmt = tx.prepare_cached(&sql)?;
            let changed = stmt.execute(params_from_iter(chunk))?;
            debug!(chunk = report.statements + 1, size = chunk.len(), changed, "archived chunk");

            report.updated += changed;
            report.statements += 1;
        }

        tx.commit()?;
        Ok(report)
    }
}

/// `?1,?2,...,?n`
fn placeholders(n: usize) -> String {
    (1..=n)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(",")
}
