//! `Scheduler<E>` — time-ordered queue of future actions.
//!
//! # Ordering
//!
//! Events are keyed by `(fire_time, seq)` in a `BTreeMap`.  `seq` is a
//! per-scheduler counter, so two events due at the same instant pop in the
//! order they were scheduled, on every run.  Insert, cancel and pop are all
//! O(log n).
//!
//! # Stop semantics
//!
//! [`run_until`](Scheduler::run_until) fires every event due at or before the
//! stop time, including events scheduled *during* the drain, then parks the
//! clock at the stop time.  Anything later stays queued and never fires;
//! [`discard_pending`](Scheduler::discard_pending) drops it explicitly, and
//! dropping the scheduler does the same.

use std::collections::BTreeMap;
use std::time::Duration;

use cw_core::{DeviceId, SimClock, SimTime};

use crate::{EventHandle, ScheduleError, ScheduleResult, ScheduledEvent};

struct Entry<E> {
    owner:  Option<DeviceId>,
    action: E,
}

/// A single-threaded discrete-event scheduler over action payloads `E`.
pub struct Scheduler<E> {
    queue:    BTreeMap<(SimTime, u64), Entry<E>>,
    next_seq: u64,
    clock:    SimClock,
    /// Total events fired since construction.
    fired:    u64,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            queue:    BTreeMap::new(),
            next_seq: 0,
            clock:    SimClock::new(),
            fired:    0,
        }
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Schedule `action` to fire `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, owner: Option<DeviceId>, action: E) -> EventHandle {
        let at = self.now() + delay;
        self.insert(at, owner, action)
    }

    /// Schedule `action` at the absolute time `at`.
    ///
    /// Fails if `at` is earlier than the current time; scheduling at exactly
    /// `now` is allowed and fires after everything already due at `now`.
    pub fn schedule_at(
        &mut self,
        at:     SimTime,
        owner:  Option<DeviceId>,
        action: E,
    ) -> ScheduleResult<EventHandle> {
        let now = self.now();
        if at < now {
            return Err(ScheduleError::InPast { at, now });
        }
        Ok(self.insert(at, owner, action))
    }

    fn insert(&mut self, at: SimTime, owner: Option<DeviceId>, action: E) -> EventHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((at, seq), Entry { owner, action });
        EventHandle { time: at, seq }
    }

    /// Cancel a pending event.
    ///
    /// Returns `true` if an event was removed.  Cancelling a handle whose
    /// event already fired or was already cancelled is a no-op.
    pub fn cancel(&mut self, handle: EventHandle) -> bool {
        self.queue.remove(&(handle.time, handle.seq)).is_some()
    }

    /// `true` while the event behind `handle` is still queued.
    pub fn is_pending(&self, handle: EventHandle) -> bool {
        self.queue.contains_key(&(handle.time, handle.seq))
    }

    /// Number of pending events owned by `owner`.  O(n); meant for tests and
    /// diagnostics.
    pub fn pending_for(&self, owner: DeviceId) -> usize {
        self.queue.values().filter(|e| e.owner == Some(owner)).count()
    }

    /// Fire time of the earliest pending event, or `None` if empty.
    pub fn next_time(&self) -> Option<SimTime> {
        self.queue.keys().next().map(|&(t, _)| t)
    }

    /// Total number of pending events.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Events fired so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Pop the earliest event if it is due at or before `stop`, advancing the
    /// clock to its fire time.
    pub fn pop_due(&mut self, stop: SimTime) -> Option<ScheduledEvent<E>> {
        let mut first = self.queue.first_entry()?;
        let (time, seq) = *first.key();
        if time > stop {
            return None;
        }
        let entry = first.remove();
        self.clock.advance_to(time);
        self.fired += 1;
        Some(ScheduledEvent { time, owner: entry.owner, action: entry.action, seq })
    }

    /// Drain every event due at or before `stop`, in order, passing each to
    /// `handler` together with the scheduler so the handler can schedule
    /// follow-ups or cancel pending events.
    ///
    /// The clock ends at `stop` (or stays put if it is already later).  The
    /// first handler error aborts the drain and is returned; events left in
    /// the queue are untouched.
    ///
    /// Returns the number of events fired by this call.
    pub fn run_until<F, Err>(&mut self, stop: SimTime, mut handler: F) -> Result<u64, Err>
    where
        F: FnMut(&mut Self, ScheduledEvent<E>) -> Result<(), Err>,
    {
        let before = self.fired;
        while let Some(event) = self.pop_due(stop) {
            handler(self, event)?;
        }
        if stop > self.now() {
            self.clock.advance_to(stop);
        }
        Ok(self.fired - before)
    }

    /// Drop every pending event without firing it.  Returns how many were
    /// discarded.
    pub fn discard_pending(&mut self) -> usize {
        let n = self.queue.len();
        if n > 0 {
            log::debug!("discarding {n} pending events at {}", self.now());
        }
        self.queue.clear();
        n
    }
}
