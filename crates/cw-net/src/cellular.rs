//! `CellularNetwork` — the default `Substrate`.
//!
//! # Path of one packet
//!
//! ```text
//! device ──uplink (per cell, FIFO)──▶ base station ──radio latency──▶ core
//!        ──backhaul (shared, FIFO)──▶ cloud, after backhaul latency
//! ```
//!
//! Each cell's uplink serialises one packet at a time: a packet sent while
//! the uplink is busy waits until it is free.  All devices on a cell share
//! that queue, so crowding one cell raises its delay.  Loss is a Bernoulli
//! draw per packet from the network's own seeded RNG.

use std::net::Ipv4Addr;
use std::time::Duration;

use cw_core::{BaseStationId, CoreError, NodeId, SimRng, SimTime};

use crate::config::serialization_delay;
use crate::{
    AddressPool, CellularConfig, NetError, NetResult, Packet, Substrate, Transit,
};

/// IPv4 + UDP header bytes added to every payload on the wire.
pub const HEADER_BYTES: usize = 28;

#[derive(Clone, Copy, Debug, Default)]
struct NodeState {
    station: Option<BaseStationId>,
    addr:    Option<Ipv4Addr>,
}

/// Counters of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellLoad {
    /// Nodes currently attached.
    pub attached: u32,
    /// Packets accepted for transmission.
    pub sent:     u64,
    /// Packets lost on the radio link.
    pub dropped:  u64,
}

#[derive(Clone, Debug, Default)]
struct Cell {
    uplink_free_at: SimTime,
    load:           CellLoad,
}

pub struct CellularNetwork {
    config:           CellularConfig,
    radio_latency:    Duration,
    backhaul_latency: Duration,
    nodes:            Vec<NodeState>,
    cells:            Vec<Cell>,
    pool:             AddressPool,
    backhaul_free_at: SimTime,
    rng:              SimRng,
}

impl CellularNetwork {
    /// A network of `base_stations` cells.  `seed` drives packet loss only.
    pub fn new(config: CellularConfig, base_stations: u32, seed: u64) -> NetResult<Self> {
        config.validate()?;
        if base_stations == 0 {
            return Err(CoreError::Config("at least one base station is required".into()).into());
        }
        Ok(Self {
            radio_latency:    config.radio_latency()?,
            backhaul_latency: config.backhaul_latency()?,
            config,
            nodes:            Vec::new(),
            cells:            vec![Cell::default(); base_stations as usize],
            pool:             AddressPool::new(),
            backhaul_free_at: SimTime::ZERO,
            rng:              SimRng::new(seed),
        })
    }

    pub fn config(&self) -> &CellularConfig {
        &self.config
    }

    pub fn base_stations(&self) -> u32 {
        self.cells.len() as u32
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn station_of(&self, node: NodeId) -> Option<BaseStationId> {
        self.nodes.get(node.index()).and_then(|n| n.station)
    }

    pub fn address_of(&self, node: NodeId) -> Option<Ipv4Addr> {
        self.nodes.get(node.index()).and_then(|n| n.addr)
    }

    pub fn cell_load(&self, station: BaseStationId) -> Option<CellLoad> {
        self.cells.get(station.index()).map(|c| c.load)
    }

    fn node_mut(&mut self, node: NodeId) -> NetResult<&mut NodeState> {
        self.nodes.get_mut(node.index()).ok_or(NetError::UnknownNode(node))
    }
}

impl Substrate for CellularNetwork {
    fn create_node(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeState::default());
        id
    }

    fn attach(&mut self, node: NodeId, station: BaseStationId) -> NetResult<()> {
        let count = self.base_stations();
        if station.index() >= self.cells.len() {
            return Err(NetError::UnknownBaseStation { station, count });
        }
        let previous = self.node_mut(node)?.station.replace(station);
        if let Some(old) = previous {
            self.cells[old.index()].load.attached -= 1;
        }
        self.cells[station.index()].load.attached += 1;
        log::trace!("{node} attached to {station}");
        Ok(())
    }

    fn assign_address(&mut self, node: NodeId) -> NetResult<Ipv4Addr> {
        if let Some(addr) = self.node_mut(node)?.addr {
            return Ok(addr);
        }
        let addr = self.pool.allocate()?;
        self.node_mut(node)?.addr = Some(addr);
        Ok(addr)
    }

    fn send(&mut self, now: SimTime, packet: &Packet) -> NetResult<Transit> {
        let state = *self
            .nodes
            .get(packet.node.index())
            .ok_or(NetError::UnknownNode(packet.node))?;
        if state.addr.is_none() {
            return Err(NetError::Unaddressed(packet.node));
        }
        let station = state.station.ok_or(NetError::NotAttached(packet.node))?;
        let wire = packet.bytes + HEADER_BYTES;

        let cell = &mut self.cells[station.index()];
        let on_air = now.max(cell.uplink_free_at) + serialization_delay(wire, self.config.uplink_bps);
        cell.uplink_free_at = on_air;
        cell.load.sent += 1;

        if self.config.loss_rate > 0.0 && self.rng.gen_bool(self.config.loss_rate) {
            cell.load.dropped += 1;
            log::debug!("{} lost on {station} at {now}", packet.flow_key());
            return Ok(Transit::Drop);
        }

        let at_core = on_air + self.radio_latency;
        let backhauled =
            at_core.max(self.backhaul_free_at) + serialization_delay(wire, self.config.backhaul_bps);
        self.backhaul_free_at = backhauled;

        Ok(Transit::Deliver { arrival: backhauled + self.backhaul_latency })
    }
}

impl std::fmt::Debug for CellularNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellularNetwork")
            .field("base_stations", &self.cells.len())
            .field("nodes", &self.nodes.len())
            .field("addresses", &self.pool.allocated())
            .finish()
    }
}
