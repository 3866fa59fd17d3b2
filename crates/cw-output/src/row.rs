//! Plain data row types written by output backends.

use cw_flow::FlowEntry;
use cw_telemetry::Report;

/// One telemetry report as it left the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Emission time in nanoseconds of virtual time.
    pub time_ns:      u64,
    pub device_id:    u32,
    /// `"bin"` or `"truck"`.
    pub class:        &'static str,
    pub sequence:     u32,
    /// Bins only.
    pub fill_percent: Option<u8>,
    /// Bytes on the wire, padding included.
    pub bytes:        u64,
    /// The `KEY:value,...` payload text.
    pub payload:      String,
}

impl ReportRow {
    pub fn from_report(report: &Report) -> Self {
        Self {
            time_ns:      report.time.as_nanos(),
            device_id:    report.device.0,
            class:        report.class.as_str(),
            sequence:     report.sequence,
            fill_percent: report.fill.map(|f| f.percent()),
            bytes:        report.wire_size() as u64,
            payload:      report.payload.to_string(),
        }
    }
}

/// Final counters of one flow.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowRow {
    pub flow_id:       u32,
    pub src:           String,
    pub dst:           String,
    pub protocol:      &'static str,
    pub src_port:      u16,
    pub dst_port:      u16,
    pub tx_packets:    u64,
    pub rx_packets:    u64,
    pub lost_packets:  u64,
    pub tx_bytes:      u64,
    pub rx_bytes:      u64,
    /// Mean one-way delay over received packets; 0 when none arrived.
    pub mean_delay_ms: f64,
    /// `None` if the flow never transmitted.
    pub first_tx_ns:   Option<u64>,
    /// `None` if the flow never received.
    pub last_rx_ns:    Option<u64>,
}

impl FlowRow {
    pub fn from_entry(entry: &FlowEntry) -> Self {
        let stats = &entry.stats;
        Self {
            flow_id:       entry.id.0,
            src:           entry.key.src.to_string(),
            dst:           entry.key.dst.to_string(),
            protocol:      entry.key.protocol.as_str(),
            src_port:      entry.key.src_port,
            dst_port:      entry.key.dst_port,
            tx_packets:    stats.tx_packets,
            rx_packets:    stats.rx_packets,
            lost_packets:  stats.lost(),
            tx_bytes:      stats.tx_bytes,
            rx_bytes:      stats.rx_bytes,
            mean_delay_ms: stats.mean_delay().map_or(0.0, |d| d.as_nanos() as f64 / 1e6),
            first_tx_ns:   stats.first_tx.map(|t| t.as_nanos()),
            last_rx_ns:    stats.last_rx.map(|t| t.as_nanos()),
        }
    }
}
