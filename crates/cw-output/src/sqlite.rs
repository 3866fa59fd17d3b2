//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `reports` and `flows`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{FlowRow, OutputResult, ReportRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS reports (
                 time_ns      INTEGER NOT NULL,
                 device_id    INTEGER NOT NULL,
                 class        TEXT    NOT NULL,
                 sequence     INTEGER NOT NULL,
                 fill_percent INTEGER,
                 bytes        INTEGER NOT NULL,
                 payload      TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS flows (
                 flow_id       INTEGER PRIMARY KEY,
                 src           TEXT    NOT NULL,
                 dst           TEXT    NOT NULL,
                 protocol      TEXT    NOT NULL,
                 src_port      INTEGER NOT NULL,
                 dst_port      INTEGER NOT NULL,
                 tx_packets    INTEGER NOT NULL,
                 rx_packets    INTEGER NOT NULL,
                 lost_packets  INTEGER NOT NULL,
                 tx_bytes      INTEGER NOT NULL,
                 rx_bytes      INTEGER NOT NULL,
                 mean_delay_ms REAL    NOT NULL,
                 first_tx_ns   INTEGER,
                 last_rx_ns    INTEGER
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_reports(&mut self, rows: &[ReportRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO reports \
                 (time_ns, device_id, class, sequence, fill_percent, bytes, payload) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.time_ns as i64,
                    row.device_id,
                    row.class,
                    row.sequence,
                    row.fill_percent,
                    row.bytes as i64,
                    row.payload,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_flows(&mut self, rows: &[FlowRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO flows \
                 (flow_id, src, dst, protocol, src_port, dst_port, tx_packets, rx_packets, \
                  lost_packets, tx_bytes, rx_bytes, mean_delay_ms, first_tx_ns, last_rx_ns) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.flow_id,
                    row.src,
                    row.dst,
                    row.protocol,
                    row.src_port,
                    row.dst_port,
                    row.tx_packets as i64,
                    row.rx_packets as i64,
                    row.lost_packets as i64,
                    row.tx_bytes as i64,
                    row.rx_bytes as i64,
                    row.mean_delay_ms,
                    row.first_tx_ns.map(|t| t as i64),
                    row.last_rx_ns.map(|t| t as i64),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
