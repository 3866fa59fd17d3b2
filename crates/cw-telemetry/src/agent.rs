//! The device agent state machine.

use std::time::Duration;

use cw_core::{DeviceClass, DeviceId, DeviceRng, Endpoint};
use cw_schedule::{EventHandle, Scheduler};

use crate::{DeviceKind, Report, TelemetryError, TelemetryResult};

/// Scheduler actions addressed to one device.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DeviceEvent {
    /// Application start: emit the first report and arm.
    Start(DeviceId),
    /// Periodic report.
    Send(DeviceId),
    /// Application stop: cancel the pending report.
    Stop(DeviceId),
}

impl DeviceEvent {
    pub fn device(self) -> DeviceId {
        match self {
            DeviceEvent::Start(d) | DeviceEvent::Send(d) | DeviceEvent::Stop(d) => d,
        }
    }
}

/// Reporting state of an agent.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AgentState {
    /// No pending send: not started yet, stopped, or out of reports.
    Idle,
    /// Exactly one send is pending under this handle.
    Armed(EventHandle),
}

/// One simulated endpoint and its reporting behaviour.
///
/// The agent owns its RNG and payload state exclusively; the scheduler owns
/// the pending event, and the agent keeps only its handle.  Every method that
/// can emit returns the [`Report`] instead of sending it, so the caller
/// decides how it reaches the substrate.
#[derive(Debug)]
pub struct DeviceAgent {
    id:          DeviceId,
    kind:        DeviceKind,
    destination: Option<Endpoint>,
    interval:    Duration,
    packet_size: usize,
    max_reports: Option<u32>,
    sent:        u32,
    state:       AgentState,
    rng:         DeviceRng,
}

impl DeviceAgent {
    /// Create an idle agent.  `interval` must be non-zero; configuration
    /// validation guarantees it for agents built by the simulation builder.
    pub fn new(id: DeviceId, kind: DeviceKind, interval: Duration, rng: DeviceRng) -> Self {
        debug_assert!(!interval.is_zero(), "{id}: zero reporting interval");
        Self {
            id,
            kind,
            destination: None,
            interval,
            packet_size: 0,
            max_reports: None,
            sent:        0,
            state:       AgentState::Idle,
            rng,
        }
    }

    /// A bin seeded from `global_seed`, with a random initial fill level.
    pub fn bin(id: DeviceId, interval: Duration, global_seed: u64) -> Self {
        let mut rng = DeviceRng::new(global_seed, id);
        let kind = DeviceKind::bin(&mut rng);
        Self::new(id, kind, interval, rng)
    }

    /// A truck seeded from `global_seed`.
    pub fn truck(id: DeviceId, interval: Duration, global_seed: u64) -> Self {
        Self::new(id, DeviceKind::Truck, interval, DeviceRng::new(global_seed, id))
    }

    /// Pad every payload to `bytes` on the wire.
    pub fn with_packet_size(mut self, bytes: usize) -> Self {
        self.packet_size = bytes;
        self
    }

    /// Stop after `max` reports (`None` = unlimited).
    pub fn with_max_reports(mut self, max: Option<u32>) -> Self {
        self.max_reports = max;
        self
    }

    /// Bind the agent to its collector.  Must happen before `start`.
    pub fn connect(&mut self, destination: Endpoint) {
        self.destination = Some(destination);
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> &DeviceKind {
        &self.kind
    }

    #[inline]
    pub fn class(&self) -> DeviceClass {
        self.kind.class()
    }

    #[inline]
    pub fn state(&self) -> AgentState {
        self.state
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        matches!(self.state, AgentState::Armed(_))
    }

    /// Handle of the pending send, if armed.
    pub fn pending(&self) -> Option<EventHandle> {
        match self.state {
            AgentState::Armed(h) => Some(h),
            AgentState::Idle     => None,
        }
    }

    pub fn destination(&self) -> Option<Endpoint> {
        self.destination
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn reports_sent(&self) -> u32 {
        self.sent
    }

    fn exhausted(&self) -> bool {
        self.max_reports.is_some_and(|max| self.sent >= max)
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Idle → Armed: emit the first report right away and schedule the next
    /// one `interval` later.
    ///
    /// No-op (returns `Ok(None)`) when already armed or out of reports.
    pub fn start<E: From<DeviceEvent>>(
        &mut self,
        sched: &mut Scheduler<E>,
    ) -> TelemetryResult<Option<Report>> {
        if self.is_armed() || self.exhausted() {
            log::trace!("{} start ignored in state {:?}", self.id, self.state);
            return Ok(None);
        }
        self.emit(sched).map(Some)
    }

    /// Handle the send event `fired`: emit a report and re-arm.
    ///
    /// A stale handle (not the one this agent is armed with) is ignored.
    pub fn fire<E: From<DeviceEvent>>(
        &mut self,
        fired: EventHandle,
        sched: &mut Scheduler<E>,
    ) -> TelemetryResult<Option<Report>> {
        match self.state {
            AgentState::Armed(h) if h == fired => self.emit(sched).map(Some),
            _ => Ok(None),
        }
    }

    /// Armed → Idle, cancelling the pending send.  Returns `true` if a send
    /// was cancelled; `false` (no-op) when already idle.
    pub fn stop<E>(&mut self, sched: &mut Scheduler<E>) -> bool {
        match std::mem::replace(&mut self.state, AgentState::Idle) {
            AgentState::Armed(h) => {
                sched.cancel(h);
                true
            }
            AgentState::Idle => false,
        }
    }

    /// Snapshot → report, evolve state, re-arm.
    fn emit<E: From<DeviceEvent>>(&mut self, sched: &mut Scheduler<E>) -> TelemetryResult<Report> {
        let destination = self.destination.ok_or(TelemetryError::NoDestination(self.id))?;

        let payload = self.kind.payload(self.id);
        let report = Report {
            device:   self.id,
            class:    self.kind.class(),
            sequence: self.sent,
            time:     sched.now(),
            destination,
            fill:     self.kind.fill(),
            wire:     payload.encode(self.packet_size),
            payload,
        };
        self.sent += 1;
        self.kind.after_report(&mut self.rng);

        log::debug!(
            "{} {} sent report #{} at {}{}",
            self.class(),
            self.id.0,
            report.sequence,
            report.time,
            report.fill.map(|f| format!(" (fill {f})")).unwrap_or_default(),
        );

        // Re-arm replaces: never two pending sends for one agent.
        if let AgentState::Armed(old) = self.state {
            sched.cancel(old);
        }
        self.state = if self.exhausted() {
            AgentState::Idle
        } else {
            let next = sched.schedule(self.interval, Some(self.id), DeviceEvent::Send(self.id).into());
            AgentState::Armed(next)
        };

        Ok(report)
    }
}
