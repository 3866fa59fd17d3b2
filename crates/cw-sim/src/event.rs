//! The action payload carried by the simulation's scheduler.

use cw_core::SimTime;
use cw_flow::FlowKey;
use cw_telemetry::DeviceEvent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimEvent {
    /// Lifecycle or periodic-send event of one device.
    Device(DeviceEvent),
    /// A packet reaches the collector.
    Arrival {
        key:   FlowKey,
        /// When the packet left the device.
        sent:  SimTime,
        bytes: usize,
    },
}

impl From<DeviceEvent> for SimEvent {
    fn from(event: DeviceEvent) -> Self {
        SimEvent::Device(event)
    }
}
