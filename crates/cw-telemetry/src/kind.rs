//! Device kinds and their payload formats.

use cw_core::{DeviceClass, DeviceId, DeviceRng, GeoPoint};

use crate::{FillLevel, Payload};

/// Battery level reported by every bin.  The sensor model has no drain.
pub const BIN_BATTERY_PERCENT: u8 = 85;

/// Per-kind reporting state.
///
/// The variant carries whatever the kind needs to format its next payload;
/// there is no trait hierarchy behind it.
#[derive(Clone, Debug, PartialEq)]
pub enum DeviceKind {
    /// A smart bin whose fill level grows after every report.
    Bin { fill: FillLevel },
    /// A collection truck; its payload is a fixed GPS/status string.
    Truck,
}

impl DeviceKind {
    /// A bin with a random initial fill level.
    pub fn bin(rng: &mut DeviceRng) -> Self {
        DeviceKind::Bin { fill: FillLevel::random(rng) }
    }

    pub fn class(&self) -> DeviceClass {
        match self {
            DeviceKind::Bin { .. } => DeviceClass::Bin,
            DeviceKind::Truck      => DeviceClass::Truck,
        }
    }

    /// Current fill level for bins, `None` for trucks.
    pub fn fill(&self) -> Option<FillLevel> {
        match self {
            DeviceKind::Bin { fill } => Some(*fill),
            DeviceKind::Truck        => None,
        }
    }

    /// Snapshot the current state as a payload.
    pub fn payload(&self, id: DeviceId) -> Payload {
        match self {
            DeviceKind::Bin { fill } => Payload::new()
                .with("BIN_ID", id.0)
                .with("FILL", fill)
                .with("GPS", GeoPoint::NLONGKAK)
                .with("BATTERY", format!("{BIN_BATTERY_PERCENT}%"))
                .with("STATUS", "OPERATIONAL"),
            DeviceKind::Truck => Payload::new()
                .with("TRUCK_ID", id.0)
                .with("GPS", GeoPoint::NLONGKAK)
                .with("STATUS", "ON_ROUTE"),
        }
    }

    /// Evolve the state after a report has been emitted.
    ///
    /// Returns the fill increment actually applied (bins only).
    pub fn after_report(&mut self, rng: &mut DeviceRng) -> Option<u8> {
        match self {
            DeviceKind::Bin { fill } => Some(fill.advance_random(rng)),
            DeviceKind::Truck        => None,
        }
    }
}
