//! `cw-flow` — per-flow packet accounting and run statistics.
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`key`]      | `FlowKey` 5-tuple, `Protocol`                              |
//! | [`stats`]    | `FlowStats` (tx/rx counts and bytes, delay sum)            |
//! | [`recorder`] | `FlowRecorder`, `FlowSnapshot`, `FlowEntry`                |
//! | [`summary`]  | `aggregate`, `NetworkSummary`, delivery and WAN verdicts   |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `serde`   | Derives `Serialize`/`Deserialize` on public types.       |
//! | `fx-hash` | FxHash instead of SipHash for the flow index.            |

pub mod key;
pub mod recorder;
pub mod stats;
pub mod summary;

#[cfg(test)]
mod tests;

pub use key::{FlowKey, Protocol};
pub use recorder::{FlowEntry, FlowRecorder, FlowSnapshot};
pub use stats::FlowStats;
pub use summary::{
    DeliveryVerdict, EXCELLENT_DELAY_MS, NetworkSummary, SUCCESS_PDR_PERCENT, WanVerdict,
    aggregate,
};
