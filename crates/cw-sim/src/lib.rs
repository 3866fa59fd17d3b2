//! `cw-sim` — scenario builder and discrete-event run loop.
//!
//! # Event loop
//!
//! ```text
//! build:  validate config → per device: create node, attach (policy),
//!         assign address, connect agent to collector, schedule Start;
//!         then schedule every Stop at the stop time
//! run:    scheduler.run_until(stop):
//!           Start/Send → agent emits Report → recorder.on_transmit
//!                        → substrate.send → Deliver: schedule Arrival
//!                                         → Drop:    observer.on_dropped
//!           Stop       → agent cancels its pending send
//!           Arrival    → recorder.on_receive (delay = now - sent)
//!         discard anything after the stop time
//!         → FlowSnapshot
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cw_core::ScenarioConfig;
//! use cw_net::CellularConfig;
//! use cw_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::cellular(ScenarioConfig::default(), CellularConfig::default())?
//!     .build()?;
//! let summary = sim.run(&mut NoopObserver)?.aggregate();
//! ```

pub mod builder;
pub mod deployment;
pub mod error;
pub mod event;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use deployment::Device;
pub use error::{SimError, SimResult};
pub use event::SimEvent;
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
