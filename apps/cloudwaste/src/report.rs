//! Result printing.

use std::fmt::Write as _;

use serde::Serialize;

use crate::run::{MeanSummary, Replication};

const RULE: &str = "========================================";

/// Text block for one replication.
pub fn format_replication(rep: &Replication) -> String {
    let s = &rep.summary;
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "SIMULATION RESULTS (seed {})", rep.seed);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Flows: {}", s.flows);
    let _ = writeln!(out, "Total Packets Sent: {}", s.total_tx);
    let _ = writeln!(out, "Total Packets Received: {}", s.total_rx);
    let _ = writeln!(out, "Packets Lost: {}", s.lost);
    let _ = writeln!(out, "Packet Delivery Ratio: {:.2}%", s.packet_delivery_ratio);
    let _ = writeln!(out, "Average End-to-End Delay: {:.3} ms", s.mean_delay_ms);
    let _ = writeln!(out);
    let _ = writeln!(out, "Bin-to-Cloud Communication: {}", s.delivery_verdict());
    let _ = writeln!(out, "WAN Performance: {}", s.wan_verdict());
    let _ = writeln!(out, "{RULE}");
    out
}

/// Text block for the mean over several replications.
pub fn format_mean(mean: &MeanSummary) -> String {
    format!(
        "Mean over {} replications: PDR {:.2}%  |  delay {:.3} ms\n",
        mean.replications, mean.packet_delivery_ratio, mean.mean_delay_ms,
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    replications: &'a [Replication],
    mean:         MeanSummary,
}

pub fn to_json(results: &[Replication], mean: MeanSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport { replications: results, mean })
}
