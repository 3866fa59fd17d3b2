//! The `Sim` struct and its event loop.

use cw_core::{BaseStationId, DeviceId, Endpoint, ScenarioConfig, SimTime};
use cw_flow::{FlowRecorder, FlowSnapshot};
use cw_net::Substrate;
use cw_schedule::Scheduler;

use crate::deployment::{Deployment, Device};
use crate::{SimEvent, SimObserver, SimResult};

/// The main simulation runner.
///
/// One `Sim` owns one scheduler, one substrate and one flow recorder; nothing
/// is shared between instances, so independent runs may live on separate
/// threads.
///
/// Each fired event is dispatched in order:
///
/// - `Start` / `Send` / `Stop` drive the device's agent.  A report it emits
///   is counted as transmitted and handed to the substrate; a delivery is
///   scheduled as an `Arrival` at the substrate's arrival time.
/// - `Arrival` counts the packet as received with its one-way delay.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: Substrate> {
    pub config: ScenarioConfig,
    pub(crate) stop:       SimTime,
    pub(crate) server:     Endpoint,
    pub(crate) scheduler:  Scheduler<SimEvent>,
    pub(crate) deployment: Deployment<S>,
}

impl<S: Substrate> Sim<S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run to the stop time and return the final flow counters.
    ///
    /// Events due exactly at the stop time still fire.  Anything later,
    /// including packets still in flight, is discarded.  Running again after
    /// completion fires nothing and returns the same counters.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<FlowSnapshot> {
        let fired = self.run_until(self.stop, observer)?;

        let discarded = self.scheduler.discard_pending();
        if discarded > 0 {
            log::warn!("{discarded} events pending at stop time {} discarded", self.stop);
        }

        let flows = self.deployment.recorder.snapshot();
        observer.on_sim_end(self.stop, &flows);

        let summary = flows.aggregate();
        log::info!(
            "run finished at {}: {fired} events, {} sent, {} received, PDR {:.2}%, mean delay {:.3} ms",
            self.stop,
            summary.total_tx,
            summary.total_rx,
            summary.packet_delivery_ratio,
            summary.mean_delay_ms,
        );
        Ok(flows)
    }

    /// Fire every event due at or before `until` (capped at the stop time).
    ///
    /// Useful for tests and incremental stepping.  Returns the number of
    /// events fired.
    pub fn run_until<O: SimObserver>(&mut self, until: SimTime, observer: &mut O) -> SimResult<u64> {
        let until = until.min(self.stop);
        let Sim { scheduler, deployment, .. } = self;
        scheduler.run_until(until, |sched, event| deployment.handle(sched, event, observer))
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    pub fn stop_time(&self) -> SimTime {
        self.stop
    }

    pub fn server(&self) -> Endpoint {
        self.server
    }

    /// Devices in `DeviceId` order.
    pub fn devices(&self) -> &[Device] {
        &self.deployment.devices
    }

    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.deployment.devices.get(id.index())
    }

    /// Number of devices attached to `station`.
    pub fn attached_to(&self, station: BaseStationId) -> usize {
        self.deployment.devices.iter().filter(|d| d.station == station).count()
    }

    pub fn substrate(&self) -> &S {
        &self.deployment.substrate
    }

    /// Live flow counters (final only after [`run`](Self::run)).
    pub fn flows(&self) -> &FlowRecorder {
        &self.deployment.recorder
    }

    /// Events still queued.
    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }
}
