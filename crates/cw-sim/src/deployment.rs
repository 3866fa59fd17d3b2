//! Devices, the substrate they talk through, and the flow recorder, plus
//! the event dispatch that ties them together.

use cw_core::{BaseStationId, CoreError, Endpoint, NodeId};
use cw_flow::FlowRecorder;
use cw_net::{Packet, Substrate, Transit};
use cw_schedule::{ScheduledEvent, Scheduler};
use cw_telemetry::{DeviceAgent, DeviceEvent, Report};

use crate::{SimEvent, SimObserver, SimResult};

/// One deployed device: its agent and where it sits in the network.
#[derive(Debug)]
pub struct Device {
    pub agent:   DeviceAgent,
    pub node:    NodeId,
    pub station: BaseStationId,
    /// Source address and port of the device socket.
    pub source:  Endpoint,
}

pub(crate) struct Deployment<S> {
    pub(crate) devices:   Vec<Device>,
    pub(crate) substrate: S,
    pub(crate) recorder:  FlowRecorder,
}

impl<S: Substrate> Deployment<S> {
    pub(crate) fn handle<O: SimObserver>(
        &mut self,
        sched:    &mut Scheduler<SimEvent>,
        event:    ScheduledEvent<SimEvent>,
        observer: &mut O,
    ) -> SimResult<()> {
        let handle = event.handle();
        match event.action {
            SimEvent::Device(action) => {
                let id = action.device();
                let agent = &mut self
                    .devices
                    .get_mut(id.index())
                    .ok_or(CoreError::DeviceNotFound(id))?
                    .agent;
                let report = match action {
                    DeviceEvent::Start(_) => agent.start(sched)?,
                    DeviceEvent::Send(_)  => agent.fire(handle, sched)?,
                    DeviceEvent::Stop(_)  => {
                        agent.stop(sched);
                        None
                    }
                };
                if let Some(report) = report {
                    self.transmit(sched, report, observer)?;
                }
            }
            SimEvent::Arrival { key, sent, bytes } => {
                let now = sched.now();
                self.recorder.on_receive(key, sent, now, bytes);
                log::debug!("{key} delivered at {now} after {:?}", now - sent);
                observer.on_delivered(now, &key, now - sent);
            }
        }
        Ok(())
    }

    /// Hand a fresh report to the substrate and schedule its arrival.
    fn transmit<O: SimObserver>(
        &mut self,
        sched:    &mut Scheduler<SimEvent>,
        report:   Report,
        observer: &mut O,
    ) -> SimResult<()> {
        let now = sched.now();
        let device = &self.devices[report.device.index()];
        let packet = Packet::udp(device.node, device.source, report.destination, report.wire_size());
        let key = packet.flow_key();

        observer.on_report(now, report.device, &report);
        self.recorder.on_transmit(key, now, packet.bytes);

        match self.substrate.send(now, &packet)? {
            Transit::Deliver { arrival } => {
                sched.schedule_at(arrival, None, SimEvent::Arrival { key, sent: now, bytes: packet.bytes })?;
            }
            Transit::Drop => observer.on_dropped(now, &key),
        }
        Ok(())
    }
}
