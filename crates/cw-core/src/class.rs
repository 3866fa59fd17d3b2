//! Device class enum shared by attachment, telemetry and output crates.

/// The kind of endpoint a device represents, without any per-kind state.
///
/// `cw-telemetry` carries the state-bearing variant (`DeviceKind`); this
/// plain tag is what configuration, attachment and output rows need.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DeviceClass {
    /// Fixed smart bin reporting fill level.
    Bin,
    /// Collection truck reporting GPS position.
    Truck,
}

impl DeviceClass {
    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceClass::Bin   => "bin",
            DeviceClass::Truck => "truck",
        }
    }
}

impl std::fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
