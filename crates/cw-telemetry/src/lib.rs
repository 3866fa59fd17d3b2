//! `cw-telemetry` — device agents that generate synthetic telemetry.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`fill`]    | `FillLevel` — bounded, non-decreasing bin fill percentage       |
//! | [`kind`]    | `DeviceKind` (`Bin { fill }` / `Truck`) and payload formatting  |
//! | [`payload`] | `Payload` key-value fields, `Report`                            |
//! | [`agent`]   | `DeviceAgent`, `AgentState` (Idle / Armed), `DeviceEvent`       |
//! | [`error`]   | `TelemetryError`, `TelemetryResult<T>`                          |
//!
//! # State machine
//!
//! ```text
//!            start (emit + arm)          fire (emit + re-arm)
//!   Idle ─────────────────────────▶ Armed ◀──────────────┐
//!    ▲                                │  └───────────────┘
//!    └────── stop (cancel) ───────────┤
//!    └────── max_reports reached ─────┘
//! ```
//!
//! An agent never acknowledges, retries or even notices packet loss: every
//! emitted [`Report`] is handed to the substrate and forgotten.

pub mod agent;
pub mod error;
pub mod fill;
pub mod kind;
pub mod payload;


pub use agent::{AgentState, DeviceAgent, DeviceEvent};
pub use error::{TelemetryError, TelemetryResult};
pub use fill::FillLevel;
pub use kind::DeviceKind;
pub use payload::{Payload, Report};
