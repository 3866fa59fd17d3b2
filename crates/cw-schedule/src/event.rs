//! Scheduled events and the handles used to cancel them.

use cw_core::{DeviceId, SimTime};

/// Opaque reference to one scheduled event.
///
/// The handle is the event's queue key, so cancelling is a single map
/// removal and a handle to a fired or cancelled event simply finds nothing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct EventHandle {
    pub(crate) time: SimTime,
    pub(crate) seq:  u64,
}

impl EventHandle {
    /// The virtual time at which the event is (or was) due.
    #[inline]
    pub fn fire_time(&self) -> SimTime {
        self.time
    }
}

/// An event popped from the scheduler, handed to the run loop's handler.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEvent<E> {
    /// When the event fires; equal to the scheduler's clock while handled.
    pub time:   SimTime,
    /// The agent that scheduled it, `None` for substrate events.
    pub owner:  Option<DeviceId>,
    pub action: E,
    pub(crate) seq: u64,
}

impl<E> ScheduledEvent<E> {
    /// The handle this event was scheduled under.
    #[inline]
    pub fn handle(&self) -> EventHandle {
        EventHandle { time: self.time, seq: self.seq }
    }
}
