//! The substrate seam: what the simulation needs from a network model.
//!
//! The simulation never looks inside the network.  It creates nodes,
//! attaches them, assigns addresses, and hands each outgoing [`Packet`] to
//! [`Substrate::send`], which decides whether and when it arrives.  Delivery
//! is then scheduled by the caller as an ordinary event.

use std::net::Ipv4Addr;

use cw_core::{BaseStationId, Endpoint, NodeId, SimTime};
use cw_flow::{FlowKey, Protocol};

use crate::NetResult;

/// An outgoing datagram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packet {
    /// Sending node.
    pub node:     NodeId,
    pub src:      Endpoint,
    pub dst:      Endpoint,
    pub protocol: Protocol,
    /// Payload size in bytes, headers excluded.
    pub bytes:    usize,
}

impl Packet {
    pub fn udp(node: NodeId, src: Endpoint, dst: Endpoint, bytes: usize) -> Self {
        Self { node, src, dst, protocol: Protocol::Udp, bytes }
    }

    pub fn flow_key(&self) -> FlowKey {
        FlowKey::new(self.src, self.dst, self.protocol)
    }
}

/// Fate of a packet handed to the substrate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transit {
    /// The packet reaches its destination at `arrival`.
    Deliver { arrival: SimTime },
    /// The packet is lost.
    Drop,
}

impl Transit {
    pub fn arrival(self) -> Option<SimTime> {
        match self {
            Transit::Deliver { arrival } => Some(arrival),
            Transit::Drop                => None,
        }
    }
}

/// Pluggable network model.
pub trait Substrate {
    /// Create a fresh, unattached, unaddressed node.
    fn create_node(&mut self) -> NodeId;

    /// Attach `node` to `station`.  Re-attaching moves the node.
    fn attach(&mut self, node: NodeId, station: BaseStationId) -> NetResult<()>;

    /// Give `node` an IPv4 address.  Idempotent: a node that already has one
    /// keeps it.
    fn assign_address(&mut self, node: NodeId) -> NetResult<Ipv4Addr>;

    /// Transmit `packet` at `now`.
    fn send(&mut self, now: SimTime, packet: &Packet) -> NetResult<Transit>;
}
