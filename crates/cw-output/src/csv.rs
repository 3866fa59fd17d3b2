//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `reports.csv`
//! - `flows.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{FlowRow, OutputResult, ReportRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    reports:  Writer<File>,
    flows:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut reports = Writer::from_path(dir.join("reports.csv"))?;
        reports.write_record([
            "time_ns", "device_id", "class", "sequence", "fill_percent", "bytes", "payload",
        ])?;

        let mut flows = Writer::from_path(dir.join("flows.csv"))?;
        flows.write_record([
            "flow_id", "src", "dst", "protocol", "src_port", "dst_port", "tx_packets",
            "rx_packets", "lost_packets", "tx_bytes", "rx_bytes", "mean_delay_ms", "first_tx_ns",
            "last_rx_ns",
        ])?;

        Ok(Self { reports, flows, finished: false })
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_reports(&mut self, rows: &[ReportRow]) -> OutputResult<()> {
        for row in rows {
            self.reports.write_record(&[
                row.time_ns.to_string(),
                row.device_id.to_string(),
                row.class.to_string(),
                row.sequence.to_string(),
                opt(row.fill_percent),
                row.bytes.to_string(),
                row.payload.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_flows(&mut self, rows: &[FlowRow]) -> OutputResult<()> {
        for row in rows {
            self.flows.write_record(&[
                row.flow_id.to_string(),
                row.src.clone(),
                row.dst.clone(),
                row.protocol.to_string(),
                row.src_port.to_string(),
                row.dst_port.to_string(),
                row.tx_packets.to_string(),
                row.rx_packets.to_string(),
                row.lost_packets.to_string(),
                row.tx_bytes.to_string(),
                row.rx_bytes.to_string(),
                format!("{:.6}", row.mean_delay_ms),
                opt(row.first_tx_ns),
                opt(row.last_rx_ns),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.reports.flush()?;
        self.flows.flush()?;
        Ok(())
    }
}
