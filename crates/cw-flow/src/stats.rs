//! Per-flow counters.

use std::time::Duration;

use cw_core::SimTime;

/// Accumulated counters of one flow.
///
/// Delay is summed in integer nanoseconds so totals do not depend on the
/// order in which packets were received.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowStats {
    pub tx_packets:      u64,
    pub rx_packets:      u64,
    pub tx_bytes:        u64,
    pub rx_bytes:        u64,
    /// Sum of `receive_time - send_time` over received packets.
    pub delay_sum_nanos: u64,
    pub first_tx:        Option<SimTime>,
    pub last_rx:         Option<SimTime>,
}

impl FlowStats {
    /// Packets transmitted but never received.
    #[inline]
    pub fn lost(&self) -> u64 {
        self.tx_packets.saturating_sub(self.rx_packets)
    }

    pub fn delay_sum(&self) -> Duration {
        Duration::from_nanos(self.delay_sum_nanos)
    }

    /// Mean one-way delay over received packets, `None` before the first
    /// reception.
    pub fn mean_delay(&self) -> Option<Duration> {
        (self.rx_packets > 0).then(|| Duration::from_nanos(self.delay_sum_nanos / self.rx_packets))
    }

    pub(crate) fn record_tx(&mut self, at: SimTime, bytes: usize) {
        self.tx_packets += 1;
        self.tx_bytes += bytes as u64;
        self.first_tx.get_or_insert(at);
    }

    pub(crate) fn record_rx(&mut self, sent: SimTime, received: SimTime, bytes: usize) {
        self.rx_packets += 1;
        self.rx_bytes += bytes as u64;
        self.delay_sum_nanos += received.since(sent).as_nanos() as u64;
        self.last_rx = Some(self.last_rx.map_or(received, |t| t.max(received)));
    }
}
