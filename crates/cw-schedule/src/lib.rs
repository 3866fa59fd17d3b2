//! `cw-schedule` — the discrete-event scheduler.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`event`]     | `EventHandle`, `ScheduledEvent<E>`                        |
//! | [`scheduler`] | `Scheduler<E>` (`BTreeMap<(SimTime, seq), _>`)            |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Execution model (summary)
//!
//! ```text
//! loop:
//!   (time, seq) = earliest key with time <= stop    else break
//!   clock       = time
//!   handler(&mut scheduler, event)                  // may schedule / cancel
//! clock = stop
//! ```
//!
//! One action runs at a time and runs to completion.  Events at equal times
//! fire in the order they were scheduled because `seq` grows monotonically.
//! Each simulation owns its own `Scheduler`, so independent runs can share a
//! process (or a thread pool) without global state.

pub mod error;
pub mod event;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use event::{EventHandle, ScheduledEvent};
pub use scheduler::Scheduler;
