//! End-of-run statistics over a `FlowSnapshot`.

use std::fmt;

use crate::FlowSnapshot;

/// Delivery ratio (percent) above which bin-to-cloud delivery counts as a
/// success.
pub const SUCCESS_PDR_PERCENT: f64 = 90.0;

/// Mean delay (ms) below which WAN performance counts as excellent.
pub const EXCELLENT_DELAY_MS: f64 = 200.0;

/// Network-wide totals of one run.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkSummary {
    pub flows:                 usize,
    pub total_tx:              u64,
    pub total_rx:              u64,
    pub lost:                  u64,
    /// `rx / tx * 100`, 0 when nothing was sent.
    pub packet_delivery_ratio: f64,
    /// Mean one-way delay in ms over received packets, 0 when nothing
    /// arrived.
    pub mean_delay_ms:         f64,
}

impl NetworkSummary {
    pub fn delivery_verdict(&self) -> DeliveryVerdict {
        if self.packet_delivery_ratio > SUCCESS_PDR_PERCENT {
            DeliveryVerdict::Success
        } else {
            DeliveryVerdict::Degraded
        }
    }

    pub fn wan_verdict(&self) -> WanVerdict {
        if self.mean_delay_ms < EXCELLENT_DELAY_MS {
            WanVerdict::Excellent
        } else {
            WanVerdict::Acceptable
        }
    }
}

/// Reduce a snapshot to network-wide totals.
///
/// Integer sums only until the final division, so the result is identical
/// for any flow order.
pub fn aggregate(snapshot: &FlowSnapshot) -> NetworkSummary {
    let mut tx: u64 = 0;
    let mut rx: u64 = 0;
    let mut lost: u64 = 0;
    let mut delay_nanos: u128 = 0;
    for entry in snapshot {
        tx += entry.stats.tx_packets;
        rx += entry.stats.rx_packets;
        lost += entry.stats.lost();
        delay_nanos += entry.stats.delay_sum_nanos as u128;
    }

    let packet_delivery_ratio = if tx > 0 { rx as f64 / tx as f64 * 100.0 } else { 0.0 };
    let mean_delay_ms = if rx > 0 { delay_nanos as f64 / rx as f64 / 1e6 } else { 0.0 };

    NetworkSummary {
        flows: snapshot.len(),
        total_tx: tx,
        total_rx: rx,
        lost,
        packet_delivery_ratio,
        mean_delay_ms,
    }
}

// ── Verdicts ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DeliveryVerdict {
    Success,
    Degraded,
}

impl fmt::Display for DeliveryVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeliveryVerdict::Success  => "SUCCESS",
            DeliveryVerdict::Degraded => "DEGRADED",
        })
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WanVerdict {
    Excellent,
    Acceptable,
}

impl fmt::Display for WanVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WanVerdict::Excellent  => "EXCELLENT",
            WanVerdict::Acceptable => "ACCEPTABLE",
        })
    }
}
