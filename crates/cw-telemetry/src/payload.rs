//! Telemetry payloads and the reports that carry them.

use std::fmt;

use cw_core::{DeviceClass, DeviceId, Endpoint, SimTime};

use crate::FillLevel;

/// A flat list of `KEY:value` fields, kept in insertion order.
///
/// Encodes as `KEY:value,KEY:value,...`, the format the cloud collector
/// parses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Payload {
    fields: Vec<(&'static str, String)>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.
    pub fn with(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }

    /// Value of the first field named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Wire bytes, zero-padded up to `packet_size`.  A payload longer than
    /// `packet_size` is sent whole.
    pub fn encode(&self, packet_size: usize) -> Vec<u8> {
        let mut bytes = self.to_string().into_bytes();
        if bytes.len() < packet_size {
            bytes.resize(packet_size, 0);
        }
        bytes
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{k}:{v}")?;
        }
        Ok(())
    }
}

/// One telemetry emission, ready to be handed to the network substrate.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub device:   DeviceId,
    pub class:    DeviceClass,
    /// 0-based report counter of this device.
    pub sequence: u32,
    /// Virtual time of emission.
    pub time:     SimTime,
    /// Where the device is configured to send.
    pub destination: Endpoint,
    /// Fill level captured in the payload (bins only).
    pub fill:     Option<FillLevel>,
    pub payload:  Payload,
    /// Encoded, padded bytes as sent on the wire.
    pub wire:     Vec<u8>,
}

impl Report {
    #[inline]
    pub fn wire_size(&self) -> usize {
        self.wire.len()
    }
}
