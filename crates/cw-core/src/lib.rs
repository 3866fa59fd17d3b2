//! `cw-core` — foundational types for the CloudWaste cellular IoT simulator.
//!
//! This crate is a dependency of every other `cw-*` crate.  It intentionally
//! has no `cw-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `DeviceId`, `NodeId`, `BaseStationId`, `FlowId`       |
//! | [`time`]        | `SimTime`, `SimClock`, seconds → `Duration` helper    |
//! | [`rng`]         | `DeviceRng` (per-device), `SimRng` (global)           |
//! | [`geo`]         | `GeoPoint`, the fixed deployment coordinate           |
//! | [`class`]       | `DeviceClass` enum (bin / truck)                      |
//! | [`endpoint`]    | `Endpoint` (IPv4 address + port)                      |
//! | [`config`]      | `ScenarioConfig`, `FleetConfig`                       |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod class;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use class::DeviceClass;
pub use config::{FleetConfig, ScenarioConfig};
pub use endpoint::Endpoint;
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{BaseStationId, DeviceId, FlowId, NodeId};
pub use rng::{DeviceRng, SimRng};
pub use time::{SimClock, SimTime, secs_to_duration};
