//! Base-station attachment policy.
//!
//! Applied once at setup.  Bins are spread round-robin so every cell carries
//! the same share of the bin fleet; trucks all go to base station 0.

use cw_core::{BaseStationId, CoreError, DeviceClass};

use crate::NetResult;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AttachmentPolicy {
    base_stations: u32,
}

impl AttachmentPolicy {
    /// Fails with a configuration error when `base_stations == 0`.
    pub fn new(base_stations: u32) -> NetResult<Self> {
        if base_stations == 0 {
            return Err(CoreError::Config("at least one base station is required".into()).into());
        }
        Ok(Self { base_stations })
    }

    pub fn base_stations(&self) -> u32 {
        self.base_stations
    }

    /// Station for the `index`-th device of its class.
    pub fn station_for(&self, class: DeviceClass, index: u32) -> BaseStationId {
        match class {
            DeviceClass::Bin   => BaseStationId(index % self.base_stations),
            DeviceClass::Truck => BaseStationId(0),
        }
    }

    /// Stations for a whole deployment: `bins` bins followed by `trucks`
    /// trucks, in device order.
    pub fn plan(&self, bins: u32, trucks: u32) -> Vec<BaseStationId> {
        (0..bins)
            .map(|i| self.station_for(DeviceClass::Bin, i))
            .chain((0..trucks).map(|i| self.station_for(DeviceClass::Truck, i)))
            .collect()
    }
}
