//! Scenario configuration.
//!
//! Typically loaded from a TOML file by the application crate (with the
//! `serde` feature) and passed to the simulation builder.  Times are given in
//! fractional seconds at this edge and converted to exact `SimTime` /
//! `Duration` values through the checked accessors below.

use std::time::Duration;

use crate::{CoreError, CoreResult, DeviceClass, SimTime, secs_to_duration};

// ── FleetConfig ───────────────────────────────────────────────────────────────

/// Reporting behaviour shared by every device of one class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FleetConfig {
    /// Number of devices in the fleet.
    pub count: usize,

    /// Seconds between two reports of the same device.  Must be positive.
    pub interval_secs: f64,

    /// Start time of the first device of the fleet.
    pub start_secs: f64,

    /// Device `i` starts at `start_secs + i * stagger_secs`.
    pub stagger_secs: f64,

    /// Wire size of one report in bytes; shorter payloads are zero-padded.
    pub packet_size: usize,

    /// Stop reporting after this many packets.  `None` = unlimited.
    pub max_reports: Option<u32>,
}

impl FleetConfig {
    /// The default bin fleet: 50 bins every 30 s, staggered 100 ms from 2 s.
    pub fn bins() -> Self {
        Self {
            count:         50,
            interval_secs: 30.0,
            start_secs:    2.0,
            stagger_secs:  0.1,
            packet_size:   256,
            max_reports:   Some(100),
        }
    }

    /// The default truck fleet: 3 trucks reporting GPS every 2 s from 5 s.
    pub fn trucks() -> Self {
        Self {
            count:         3,
            interval_secs: 2.0,
            start_secs:    5.0,
            stagger_secs:  0.0,
            packet_size:   128,
            max_reports:   Some(100),
        }
    }

    /// Reporting interval.  Errors on zero, negative or non-finite values.
    pub fn interval(&self, class: DeviceClass) -> CoreResult<Duration> {
        match secs_to_duration(self.interval_secs) {
            Some(d) if !d.is_zero() => Ok(d),
            _ => Err(CoreError::Config(format!(
                "{class} interval must be positive, got {}",
                self.interval_secs
            ))),
        }
    }

    /// Start time of the `index`-th device of this fleet.
    pub fn start_of(&self, class: DeviceClass, index: usize) -> CoreResult<SimTime> {
        let start = secs_to_duration(self.start_secs).ok_or_else(|| {
            CoreError::Config(format!("{class} start must be >= 0, got {}", self.start_secs))
        })?;
        let stagger = secs_to_duration(self.stagger_secs).ok_or_else(|| {
            CoreError::Config(format!("{class} stagger must be >= 0, got {}", self.stagger_secs))
        })?;
        let offset = u32::try_from(index)
            .ok()
            .and_then(|i| stagger.checked_mul(i))
            .ok_or_else(|| CoreError::Config(format!("{class} stagger overflows at index {index}")))?;
        Ok(SimTime::ZERO + start + offset)
    }

    /// Check every field without building anything.
    pub fn validate(&self, class: DeviceClass) -> CoreResult<()> {
        self.interval(class)?;
        if self.count > 0 {
            self.start_of(class, self.count - 1)?;
        }
        if self.max_reports == Some(0) {
            return Err(CoreError::Config(format!("{class} max_reports must be at least 1")));
        }
        Ok(())
    }
}

// ── Fleet tables ──────────────────────────────────────────────────────────────

/// A `[scenario.bins]` / `[scenario.trucks]` table.  Every key is optional and
/// falls back to the defaults of the class the table belongs to.
#[cfg(feature = "serde")]
mod fleet_table {
    use serde::{Deserialize, Deserializer};

    use super::FleetConfig;

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct FleetTable {
        count:         Option<usize>,
        interval_secs: Option<f64>,
        start_secs:    Option<f64>,
        stagger_secs:  Option<f64>,
        packet_size:   Option<usize>,
        max_reports:   Option<u32>,
    }

    impl FleetTable {
        fn over(self, base: FleetConfig) -> FleetConfig {
            FleetConfig {
                count:         self.count.unwrap_or(base.count),
                interval_secs: self.interval_secs.unwrap_or(base.interval_secs),
                start_secs:    self.start_secs.unwrap_or(base.start_secs),
                stagger_secs:  self.stagger_secs.unwrap_or(base.stagger_secs),
                packet_size:   self.packet_size.unwrap_or(base.packet_size),
                max_reports:   self.max_reports.or(base.max_reports),
            }
        }
    }

    pub(super) fn bins<'de, D: Deserializer<'de>>(d: D) -> Result<FleetConfig, D::Error> {
        Ok(FleetTable::deserialize(d)?.over(FleetConfig::bins()))
    }

    pub(super) fn trucks<'de, D: Deserializer<'de>>(d: D) -> Result<FleetConfig, D::Error> {
        Ok(FleetTable::deserialize(d)?.over(FleetConfig::trucks()))
    }
}

// ── ScenarioConfig ────────────────────────────────────────────────────────────

/// Top-level scenario configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScenarioConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Run length; also the stop time of every device application.
    pub stop_secs: f64,

    /// Number of base stations.  Must be at least 1.
    pub base_stations: usize,

    /// UDP port of the cloud collector.
    pub server_port: u16,

    #[cfg_attr(feature = "serde", serde(deserialize_with = "fleet_table::bins"))]
    pub bins: FleetConfig,

    #[cfg_attr(feature = "serde", serde(deserialize_with = "fleet_table::trucks"))]
    pub trucks: FleetConfig,
}

impl ScenarioConfig {
    /// The simulation stop time.
    pub fn stop_time(&self) -> CoreResult<SimTime> {
        match SimTime::from_secs_f64(self.stop_secs) {
            Some(t) if t > SimTime::ZERO => Ok(t),
            _ => Err(CoreError::Config(format!(
                "stop time must be positive, got {}",
                self.stop_secs
            ))),
        }
    }

    /// Fleet settings for `class`.
    pub fn fleet(&self, class: DeviceClass) -> &FleetConfig {
        match class {
            DeviceClass::Bin   => &self.bins,
            DeviceClass::Truck => &self.trucks,
        }
    }

    /// Total number of devices across both fleets.
    pub fn device_count(&self) -> usize {
        self.bins.count + self.trucks.count
    }

    /// Reject malformed configurations before a run starts.
    pub fn validate(&self) -> CoreResult<()> {
        if self.base_stations == 0 {
            return Err(CoreError::Config("at least one base station is required".into()));
        }
        self.stop_time()?;
        self.bins.validate(DeviceClass::Bin)?;
        self.trucks.validate(DeviceClass::Truck)?;
        Ok(())
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed:          42,
            stop_secs:     120.0,
            base_stations: 2,
            server_port:   8080,
            bins:          FleetConfig::bins(),
            trucks:        FleetConfig::trucks(),
        }
    }
}
