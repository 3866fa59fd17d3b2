//! `cw-net` — the network substrate.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`substrate`] | `Substrate` trait, `Packet`, `Transit`                    |
//! | [`cellular`]  | `CellularNetwork`, the default cell + backhaul model      |
//! | [`config`]    | `CellularConfig`, serialisation delay helper              |
//! | [`policy`]    | `AttachmentPolicy` (bins round-robin, trucks on cell 0)   |
//! | [`address`]   | `AddressPool`, server address, device port                |
//! | [`error`]     | `NetError`, `NetResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `CellularConfig`.       |

pub mod address;
pub mod cellular;
pub mod config;
pub mod error;
pub mod policy;
pub mod substrate;

#[cfg(test)]
mod tests;

pub use address::{AddressPool, EPHEMERAL_PORT, FIRST_DEVICE_ADDR, GATEWAY_ADDR, SERVER_ADDR};
pub use cellular::{CellLoad, CellularNetwork, HEADER_BYTES};
pub use config::{CellularConfig, serialization_delay};
pub use error::{NetError, NetResult};
pub use policy::AttachmentPolicy;
pub use substrate::{Packet, Substrate, Transit};
