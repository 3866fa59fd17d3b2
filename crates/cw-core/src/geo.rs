//! Geographic coordinate type.
//!
//! Telemetry payloads carry a fixed coordinate string rather than a live
//! position, so `GeoPoint` is only formatted, never computed with.

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Nlongkak neighbourhood, Yaoundé, the deployment site.
    pub const NLONGKAK: GeoPoint = GeoPoint { lat: 3.848, lon: 11.502 };
}

impl std::fmt::Display for GeoPoint {
    /// Payload form: `lat,lon` with three decimals.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3},{:.3}", self.lat, self.lon)
    }
}
