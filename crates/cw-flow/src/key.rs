//! Flow identity: the 5-tuple.

use std::fmt;
use std::net::Ipv4Addr;

use cw_core::Endpoint;

/// Transport protocol of a flow.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Protocol {
    Udp,
    Tcp,
}

impl Protocol {
    /// IANA protocol number as carried in the IPv4 header.
    pub fn number(self) -> u8 {
        match self {
            Protocol::Udp => 17,
            Protocol::Tcp => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Udp => "UDP",
            Protocol::Tcp => "TCP",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// (source address, destination address, protocol, source port,
/// destination port).  Two packets with equal keys belong to the same flow
/// for the whole run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowKey {
    pub src:      Ipv4Addr,
    pub dst:      Ipv4Addr,
    pub protocol: Protocol,
    pub src_port: u16,
    pub dst_port: u16,
}

impl FlowKey {
    pub fn new(src: Endpoint, dst: Endpoint, protocol: Protocol) -> Self {
        Self {
            src:      src.addr,
            dst:      dst.addr,
            protocol,
            src_port: src.port,
            dst_port: dst.port,
        }
    }

    pub fn source(&self) -> Endpoint {
        Endpoint::new(self.src, self.src_port)
    }

    pub fn destination(&self) -> Endpoint {
        Endpoint::new(self.dst, self.dst_port)
    }
}

impl fmt::Display for FlowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} -> {}:{} ({})",
            self.src, self.src_port, self.dst, self.dst_port, self.protocol
        )
    }
}
