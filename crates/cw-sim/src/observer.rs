//! Simulation observer trait for progress reporting and data collection.

use std::time::Duration;

use cw_core::{DeviceId, SimTime};
use cw_flow::{FlowKey, FlowSnapshot};
use cw_telemetry::Report;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] as packets move.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — delivery counter
///
/// ```rust,ignore
/// struct Delivered(u64);
///
/// impl SimObserver for Delivered {
///     fn on_delivered(&mut self, _time: SimTime, _key: &FlowKey, _delay: Duration) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// A device emitted `report`; called before it enters the substrate.
    fn on_report(&mut self, _time: SimTime, _device: DeviceId, _report: &Report) {}

    /// A packet of flow `key` reached the collector after `delay`.
    fn on_delivered(&mut self, _time: SimTime, _key: &FlowKey, _delay: Duration) {}

    /// The substrate lost a packet of flow `key`.
    fn on_dropped(&mut self, _time: SimTime, _key: &FlowKey) {}

    /// Called once after the stop time with the final flow counters.
    fn on_sim_end(&mut self, _stop: SimTime, _flows: &FlowSnapshot) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
