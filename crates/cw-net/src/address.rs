//! IPv4 address plan.
//!
//! ```text
//!   7.0.0.0/8     device network (gateway 7.0.0.1, devices from 7.0.0.2)
//!   1.0.0.2       cloud server
//! ```

use std::net::Ipv4Addr;

use crate::{NetError, NetResult};

/// Device network gateway.
pub const GATEWAY_ADDR: Ipv4Addr = Ipv4Addr::new(7, 0, 0, 1);

/// First address handed to a device.
pub const FIRST_DEVICE_ADDR: Ipv4Addr = Ipv4Addr::new(7, 0, 0, 2);

/// Last usable host of the device /8.
const LAST_DEVICE_ADDR: Ipv4Addr = Ipv4Addr::new(7, 255, 255, 254);

/// The cloud collector.
pub const SERVER_ADDR: Ipv4Addr = Ipv4Addr::new(1, 0, 0, 2);

/// Source port of every device socket.
pub const EPHEMERAL_PORT: u16 = 49153;

/// Sequential allocator over the device network.
#[derive(Debug, Clone)]
pub struct AddressPool {
    next: u32,
    last: u32,
}

impl Default for AddressPool {
    fn default() -> Self {
        Self { next: u32::from(FIRST_DEVICE_ADDR), last: u32::from(LAST_DEVICE_ADDR) }
    }
}

impl AddressPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next free address, in ascending order.
    pub fn allocate(&mut self) -> NetResult<Ipv4Addr> {
        if self.next > self.last {
            return Err(NetError::AddressPoolExhausted);
        }
        let addr = Ipv4Addr::from(self.next);
        self.next += 1;
        Ok(addr)
    }

    /// Addresses handed out so far.
    pub fn allocated(&self) -> u32 {
        self.next - u32::from(FIRST_DEVICE_ADDR)
    }
}
