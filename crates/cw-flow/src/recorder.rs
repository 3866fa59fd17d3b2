//! `FlowRecorder` and the read-only `FlowSnapshot` it produces.
//!
//! Flows are created lazily on the first packet seen for a key and get
//! consecutive `FlowId`s starting at 1.  The recorder is written from the
//! single scheduler thread, so it needs no locking.

use cw_core::{FlowId, SimTime};

use crate::{FlowKey, FlowStats, NetworkSummary};

#[cfg(feature = "fx-hash")]
type FlowIndex = rustc_hash::FxHashMap<FlowKey, FlowId>;
#[cfg(not(feature = "fx-hash"))]
type FlowIndex = std::collections::HashMap<FlowKey, FlowId>;

/// One flow in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowEntry {
    pub id:    FlowId,
    pub key:   FlowKey,
    pub stats: FlowStats,
}

// ── FlowRecorder ──────────────────────────────────────────────────────────────

/// Classifies packets into flows and accumulates their counters.
#[derive(Debug, Default)]
pub struct FlowRecorder {
    index: FlowIndex,
    /// `flows[i]` has `FlowId(i + 1)`.
    flows: Vec<FlowEntry>,
}

impl FlowRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one transmitted packet of `bytes` on `key`.
    pub fn on_transmit(&mut self, key: FlowKey, send_time: SimTime, bytes: usize) -> FlowId {
        let id = self.classify(key);
        self.entry_mut(id).stats.record_tx(send_time, bytes);
        id
    }

    /// Count one received packet and add its one-way delay.
    pub fn on_receive(
        &mut self,
        key:          FlowKey,
        send_time:    SimTime,
        receive_time: SimTime,
        bytes:        usize,
    ) -> FlowId {
        let id = self.classify(key);
        self.entry_mut(id).stats.record_rx(send_time, receive_time, bytes);
        id
    }

    /// Flow id for `key`, creating the flow if this is its first packet.
    fn classify(&mut self, key: FlowKey) -> FlowId {
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = FlowId(self.flows.len() as u32 + 1);
        log::trace!("new flow {id}: {key}");
        self.index.insert(key, id);
        self.flows.push(FlowEntry { id, key, stats: FlowStats::default() });
        id
    }

    fn entry_mut(&mut self, id: FlowId) -> &mut FlowEntry {
        &mut self.flows[id.index() - 1]
    }

    pub fn flow_id(&self, key: &FlowKey) -> Option<FlowId> {
        self.index.get(key).copied()
    }

    pub fn stats(&self, id: FlowId) -> Option<&FlowStats> {
        id.index().checked_sub(1).and_then(|i| self.flows.get(i)).map(|e| &e.stats)
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Copy of the current counters.
    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot { flows: self.flows.clone() }
    }

    /// Final snapshot, consuming the recorder.
    pub fn into_snapshot(self) -> FlowSnapshot {
        FlowSnapshot { flows: self.flows }
    }
}

// ── FlowSnapshot ──────────────────────────────────────────────────────────────

/// Read-only per-flow counters at the end of a run, ordered by `FlowId`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowSnapshot {
    flows: Vec<FlowEntry>,
}

impl FlowSnapshot {
    pub fn iter(&self) -> impl Iterator<Item = &FlowEntry> {
        self.flows.iter()
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn get(&self, id: FlowId) -> Option<&FlowEntry> {
        id.index().checked_sub(1).and_then(|i| self.flows.get(i))
    }

    pub fn find(&self, key: &FlowKey) -> Option<&FlowEntry> {
        self.flows.iter().find(|e| e.key == *key)
    }

    /// Network-wide totals over every flow.
    pub fn aggregate(&self) -> NetworkSummary {
        crate::aggregate(self)
    }
}

impl<'a> IntoIterator for &'a FlowSnapshot {
    type Item = &'a FlowEntry;
    type IntoIter = std::slice::Iter<'a, FlowEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}
