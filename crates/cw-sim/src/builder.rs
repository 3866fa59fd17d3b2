//! Fluent builder for constructing a [`Sim`].

use cw_core::{CoreError, DeviceClass, DeviceId, Endpoint, ScenarioConfig};
use cw_flow::FlowRecorder;
use cw_net::{AttachmentPolicy, CellularConfig, CellularNetwork, EPHEMERAL_PORT, SERVER_ADDR, Substrate};
use cw_schedule::Scheduler;
use cw_telemetry::{DeviceAgent, DeviceEvent};

use crate::deployment::{Deployment, Device};
use crate::{Sim, SimEvent, SimResult};

/// Salt separating the substrate's loss RNG from the device RNG streams.
const NETWORK_SEED_SALT: u64 = 0x6e65_7477_6f72_6b21;

/// Fluent builder for [`Sim<S>`].
///
/// # Required inputs
///
/// - [`ScenarioConfig`]: fleets, base stations, run length, seed
/// - `S: Substrate`: the network model (see [`SimBuilder::cellular`])
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                                  |
/// |----------------|------------------------------------------|
/// | `.server(ep)`  | `1.0.0.2` on `config.server_port`        |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::cellular(config, CellularConfig::default())?.build()?;
/// let flows = sim.run(&mut NoopObserver)?;
/// println!("PDR {:.2}%", flows.aggregate().packet_delivery_ratio);
/// ```
pub struct SimBuilder<S: Substrate> {
    config:    ScenarioConfig,
    substrate: S,
    server:    Option<Endpoint>,
}

impl SimBuilder<CellularNetwork> {
    /// A builder over the default cellular substrate, sized from `config`.
    pub fn cellular(config: ScenarioConfig, cellular: CellularConfig) -> SimResult<Self> {
        config.validate()?;
        let stations = station_count(&config)?;
        let network = CellularNetwork::new(cellular, stations, config.seed ^ NETWORK_SEED_SALT)?;
        Ok(Self::new(config, network))
    }
}

impl<S: Substrate> SimBuilder<S> {
    pub fn new(config: ScenarioConfig, substrate: S) -> Self {
        Self { config, substrate, server: None }
    }

    /// Send every report to `server` instead of the default collector.
    pub fn server(mut self, server: Endpoint) -> Self {
        self.server = Some(server);
        self
    }

    /// Validate the scenario, deploy every device and schedule its start and
    /// stop, and return a ready-to-run [`Sim`].
    ///
    /// Bins get `DeviceId`s `0..bins`, trucks the ids after them.
    pub fn build(self) -> SimResult<Sim<S>> {
        let config = self.config;
        config.validate()?;
        let stop = config.stop_time()?;
        let policy = AttachmentPolicy::new(station_count(&config)?)?;
        let server = self.server.unwrap_or(Endpoint::new(SERVER_ADDR, config.server_port));

        let mut substrate = self.substrate;
        let mut scheduler: Scheduler<SimEvent> = Scheduler::new();
        let mut devices = Vec::with_capacity(config.device_count());

        for class in [DeviceClass::Bin, DeviceClass::Truck] {
            let fleet = config.fleet(class);
            let interval = fleet.interval(class)?;
            for i in 0..fleet.count {
                let id = DeviceId::from_index(devices.len())
                    .ok_or_else(|| CoreError::Config(format!("too many devices ({})", devices.len())))?;

                let node = substrate.create_node();
                let station = policy.station_for(class, i as u32);
                substrate.attach(node, station)?;
                let addr = substrate.assign_address(node)?;

                let agent = match class {
                    DeviceClass::Bin   => DeviceAgent::bin(id, interval, config.seed),
                    DeviceClass::Truck => DeviceAgent::truck(id, interval, config.seed),
                };
                let mut agent = agent
                    .with_packet_size(fleet.packet_size)
                    .with_max_reports(fleet.max_reports);
                agent.connect(server);

                scheduler.schedule_at(fleet.start_of(class, i)?, Some(id), DeviceEvent::Start(id).into())?;

                devices.push(Device {
                    agent,
                    node,
                    station,
                    source: Endpoint::new(addr, EPHEMERAL_PORT),
                });
            }
        }

        // Stops go in after every start so a start at exactly the stop time
        // still emits once, while a send re-armed for the stop time does not.
        for device in &devices {
            let id = device.agent.id();
            scheduler.schedule_at(stop, Some(id), DeviceEvent::Stop(id).into())?;
        }

        log::info!(
            "deployed {} bins and {} trucks over {} base stations; collector {server}, stop at {stop}",
            config.bins.count,
            config.trucks.count,
            policy.base_stations(),
        );

        Ok(Sim {
            config,
            stop,
            server,
            scheduler,
            deployment: Deployment { devices, substrate, recorder: FlowRecorder::new() },
        })
    }
}

fn station_count(config: &ScenarioConfig) -> SimResult<u32> {
    u32::try_from(config.base_stations).map_err(|_| {
        CoreError::Config(format!("too many base stations ({})", config.base_stations)).into()
    })
}
