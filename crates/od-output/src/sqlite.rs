//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `flows.db` file in the configured output directory with
//! two tables: `flow_lines` and `flow_summaries`, joined on `render`.

use std::path::Path;

use rusqlite::Connection;

use crate::{FlowLineRow, OutputResult, SummaryRow};
use crate::writer::OutputWriter;

/// Writes flow output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `flows.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("flows.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS flow_lines (
                 render     INTEGER NOT NULL,
                 channel    TEXT    NOT NULL,
                 rank       INTEGER NOT NULL,
                 start_id   TEXT    NOT NULL,
                 start_name TEXT    NOT NULL,
                 end_id     TEXT    NOT NULL,
                 end_name   TEXT    NOT NULL,
                 count      REAL    NOT NULL,
                 weight     REAL    NOT NULL,
                 start_lat  REAL    NOT NULL,
                 start_lon  REAL    NOT NULL,
                 end_lat    REAL    NOT NULL,
                 end_lon    REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS flow_summaries (
                 render          INTEGER PRIMARY KEY,
                 scope           TEXT    NOT NULL,
                 selection       TEXT    NOT NULL,
                 outbound_total  REAL    NOT NULL,
                 inbound_total   REAL    NOT NULL,
                 connected_zones INTEGER NOT NULL,
                 max_count       REAL    NOT NULL,
                 lines           INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_lines(&mut self, rows: &[FlowLineRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO flow_lines \
                 (render, channel, rank, start_id, start_name, end_id, end_name, \
                  count, weight, start_lat, start_lon, end_lat, end_lon) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            )?;
            for row in rows {
                let [start, end] = row.path;
                stmt.execute(rusqlite::params![
                    row.render as i64,
                    row.channel.as_str(),
                    row.rank,
                    row.start_id,
                    row.start_name,
                    row.end_id,
                    row.end_name,
                    row.count,
                    row.weight,
                    start.lat,
                    start.lon,
                    end.lat,
                    end.lon,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO flow_summaries \
             (render, scope, selection, outbound_total, inbound_total, connected_zones, max_count, lines) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                row.render as i64,
                row.scope,
                row.selection,
                row.outbound_total,
                row.inbound_total,
                row.connected_zones as i64,
                row.max_count,
                row.lines as i64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
