//! Cellular substrate parameters.

use std::time::Duration;

use cw_core::{CoreError, CoreResult, secs_to_duration};

/// Link parameters of the cellular access network and its backhaul.
///
/// Defaults model the deployment the scenario was written for: a 10 Mb/s
/// shared uplink per cell with 10 ms radio latency, and a 100 Gb/s backhaul
/// with 50 ms latency to the cloud region.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CellularConfig {
    /// One-way latency from device to base station.
    pub radio_latency_ms:    f64,
    /// Probability in [0, 1] that a packet is lost on the radio link.
    pub loss_rate:           f64,
    /// Uplink capacity of one cell, shared by its attached devices.
    pub uplink_bps:          u64,
    /// One-way latency from the core network to the server.
    pub backhaul_latency_ms: f64,
    pub backhaul_bps:        u64,
}

impl Default for CellularConfig {
    fn default() -> Self {
        Self {
            radio_latency_ms:    10.0,
            loss_rate:           0.0,
            uplink_bps:          10_000_000,
            backhaul_latency_ms: 50.0,
            backhaul_bps:        100_000_000_000,
        }
    }
}

impl CellularConfig {
    pub fn validate(&self) -> CoreResult<()> {
        self.radio_latency()?;
        self.backhaul_latency()?;
        if !(0.0..=1.0).contains(&self.loss_rate) {
            return Err(CoreError::Config(format!(
                "loss_rate must be in [0, 1], got {}",
                self.loss_rate
            )));
        }
        if self.uplink_bps == 0 || self.backhaul_bps == 0 {
            return Err(CoreError::Config("link bandwidth must be positive".into()));
        }
        Ok(())
    }

    pub fn radio_latency(&self) -> CoreResult<Duration> {
        ms_to_duration("radio_latency_ms", self.radio_latency_ms)
    }

    pub fn backhaul_latency(&self) -> CoreResult<Duration> {
        ms_to_duration("backhaul_latency_ms", self.backhaul_latency_ms)
    }
}

fn ms_to_duration(field: &str, ms: f64) -> CoreResult<Duration> {
    secs_to_duration(ms / 1_000.0)
        .ok_or_else(|| CoreError::Config(format!("{field} must be finite and >= 0, got {ms}")))
}

/// Time to clock `bytes` onto a link of `bps`, rounded up to the next
/// nanosecond.
pub fn serialization_delay(bytes: usize, bps: u64) -> Duration {
    let bits = bytes as u128 * 8;
    let nanos = (bits * 1_000_000_000).div_ceil(bps.max(1) as u128);
    Duration::from_nanos(nanos.min(u64::MAX as u128) as u64)
}
