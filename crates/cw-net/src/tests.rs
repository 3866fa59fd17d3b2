//! Unit tests for cw-net.

use std::net::Ipv4Addr;
use std::time::Duration;

use cw_core::{BaseStationId, Endpoint, NodeId, SimTime};

use crate::{
    CellularConfig, CellularNetwork, EPHEMERAL_PORT, HEADER_BYTES, NetError, Packet, SERVER_ADDR,
    Substrate, Transit, serialization_delay,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn server() -> Endpoint {
    Endpoint::new(SERVER_ADDR, 8080)
}

/// A network of `stations` cells with one ready node per entry of `attach`.
fn network(config: CellularConfig, stations: u32, attach: &[u32]) -> (CellularNetwork, Vec<Packet>) {
    let mut net = CellularNetwork::new(config, stations, 7).unwrap();
    let packets = attach
        .iter()
        .map(|&bs| {
            let node = net.create_node();
            net.attach(node, BaseStationId(bs)).unwrap();
            let addr = net.assign_address(node).unwrap();
            Packet::udp(node, Endpoint::new(addr, EPHEMERAL_PORT), server(), 256)
        })
        .collect();
    (net, packets)
}

fn arrival(t: Transit) -> SimTime {
    t.arrival().expect("delivered")
}

// ── Attachment policy ─────────────────────────────────────────────────────────

#[cfg(test)]
mod policy {
    use cw_core::{CoreError, DeviceClass};

    use super::*;
    use crate::AttachmentPolicy;

    #[test]
    fn fifty_bins_split_evenly_over_two_stations() {
        let policy = AttachmentPolicy::new(2).unwrap();
        let plan = policy.plan(50, 0);
        for (i, bs) in plan.iter().enumerate() {
            assert_eq!(*bs, BaseStationId(i as u32 % 2));
        }
        assert_eq!(plan.iter().filter(|b| b.0 == 0).count(), 25);
        assert_eq!(plan.iter().filter(|b| b.0 == 1).count(), 25);
    }

    #[test]
    fn trucks_always_on_station_zero() {
        let policy = AttachmentPolicy::new(4).unwrap();
        for i in 0..10 {
            assert_eq!(policy.station_for(DeviceClass::Truck, i), BaseStationId(0));
        }
        let plan = policy.plan(3, 2);
        assert_eq!(plan[3..], [BaseStationId(0), BaseStationId(0)]);
    }

    #[test]
    fn single_station_takes_everything() {
        let policy = AttachmentPolicy::new(1).unwrap();
        assert!(policy.plan(7, 3).iter().all(|b| *b == BaseStationId(0)));
    }

    #[test]
    fn zero_stations_is_config_error() {
        assert!(matches!(
            AttachmentPolicy::new(0),
            Err(NetError::Core(CoreError::Config(_)))
        ));
    }

    #[test]
    fn cell_loads_follow_attachment() {
        let attach: Vec<u32> = AttachmentPolicy::new(2).unwrap().plan(50, 3).iter().map(|b| b.0).collect();
        let (net, _) = network(CellularConfig::default(), 2, &attach);
        assert_eq!(net.cell_load(BaseStationId(0)).unwrap().attached, 28);
        assert_eq!(net.cell_load(BaseStationId(1)).unwrap().attached, 25);
    }
}

// ── Addressing ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod addressing {
    use super::*;
    use crate::AddressPool;

    #[test]
    fn sequential_from_7_0_0_2() {
        let (net, packets) = network(CellularConfig::default(), 1, &[0, 0, 0]);
        let addrs: Vec<Ipv4Addr> = packets.iter().map(|p| p.src.addr).collect();
        assert_eq!(
            addrs,
            vec![Ipv4Addr::new(7, 0, 0, 2), Ipv4Addr::new(7, 0, 0, 3), Ipv4Addr::new(7, 0, 0, 4)]
        );
        assert_eq!(net.address_of(NodeId(1)), Some(Ipv4Addr::new(7, 0, 0, 3)));
    }

    #[test]
    fn assign_is_idempotent() {
        let mut net = CellularNetwork::new(CellularConfig::default(), 1, 0).unwrap();
        let n = net.create_node();
        let a = net.assign_address(n).unwrap();
        assert_eq!(net.assign_address(n).unwrap(), a);
        let m = net.create_node();
        assert_eq!(net.assign_address(m).unwrap(), Ipv4Addr::new(7, 0, 0, 3));
    }

    #[test]
    fn pool_counts_allocations() {
        let mut pool = AddressPool::new();
        pool.allocate().unwrap();
        pool.allocate().unwrap();
        assert_eq!(pool.allocated(), 2);
    }

    #[test]
    fn unknown_node_rejected() {
        let mut net = CellularNetwork::new(CellularConfig::default(), 1, 0).unwrap();
        assert!(matches!(net.assign_address(NodeId(3)), Err(NetError::UnknownNode(NodeId(3)))));
    }
}

// ── Transmission ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod transmission {
    use super::*;

    fn one_hop_delay(cfg: &CellularConfig, bytes: usize) -> Duration {
        let wire = bytes + HEADER_BYTES;
        serialization_delay(wire, cfg.uplink_bps)
            + cfg.radio_latency().unwrap()
            + serialization_delay(wire, cfg.backhaul_bps)
            + cfg.backhaul_latency().unwrap()
    }

    #[test]
    fn serialization_delay_rounds_up() {
        assert_eq!(serialization_delay(125, 1_000_000), Duration::from_millis(1));
        assert_eq!(serialization_delay(1, 3), Duration::from_nanos(2_666_666_667));
    }

    #[test]
    fn idle_network_delay_is_sum_of_hops() {
        let cfg = CellularConfig::default();
        let (mut net, packets) = network(cfg.clone(), 1, &[0]);
        let t0 = SimTime::from_secs(2);
        let at = arrival(net.send(t0, &packets[0]).unwrap());
        assert_eq!(at - t0, one_hop_delay(&cfg, 256));
        assert!(at - t0 >= Duration::from_millis(60));
    }

    #[test]
    fn same_cell_packets_queue() {
        let cfg = CellularConfig::default();
        let (mut net, packets) = network(cfg.clone(), 2, &[0, 0]);
        let t0 = SimTime::from_secs(1);
        let a = arrival(net.send(t0, &packets[0]).unwrap());
        let b = arrival(net.send(t0, &packets[1]).unwrap());
        let slot = serialization_delay(256 + HEADER_BYTES, cfg.uplink_bps);
        assert_eq!(b - a, slot);
    }

    #[test]
    fn different_cells_do_not_queue_on_uplink() {
        let cfg = CellularConfig::default();
        let (mut net, packets) = network(cfg.clone(), 2, &[0, 1]);
        let t0 = SimTime::from_secs(1);
        let a = arrival(net.send(t0, &packets[0]).unwrap());
        let b = arrival(net.send(t0, &packets[1]).unwrap());
        // Only the shared backhaul slot separates them.
        assert_eq!(b - a, serialization_delay(256 + HEADER_BYTES, cfg.backhaul_bps));
    }

    #[test]
    fn unaddressed_node_is_fatal() {
        let mut net = CellularNetwork::new(CellularConfig::default(), 1, 0).unwrap();
        let node = net.create_node();
        net.attach(node, BaseStationId(0)).unwrap();
        let p = Packet::udp(node, Endpoint::new(Ipv4Addr::UNSPECIFIED, EPHEMERAL_PORT), server(), 8);
        assert!(matches!(net.send(SimTime::ZERO, &p), Err(NetError::Unaddressed(_))));
    }

    #[test]
    fn unattached_node_rejected() {
        let mut net = CellularNetwork::new(CellularConfig::default(), 1, 0).unwrap();
        let node = net.create_node();
        let addr = net.assign_address(node).unwrap();
        let p = Packet::udp(node, Endpoint::new(addr, EPHEMERAL_PORT), server(), 8);
        assert!(matches!(net.send(SimTime::ZERO, &p), Err(NetError::NotAttached(_))));
    }

    #[test]
    fn unknown_station_rejected() {
        let mut net = CellularNetwork::new(CellularConfig::default(), 2, 0).unwrap();
        let node = net.create_node();
        assert!(matches!(
            net.attach(node, BaseStationId(2)),
            Err(NetError::UnknownBaseStation { count: 2, .. })
        ));
    }

    #[test]
    fn reattach_moves_load() {
        let (mut net, packets) = network(CellularConfig::default(), 2, &[0]);
        net.attach(packets[0].node, BaseStationId(1)).unwrap();
        assert_eq!(net.cell_load(BaseStationId(0)).unwrap().attached, 0);
        assert_eq!(net.cell_load(BaseStationId(1)).unwrap().attached, 1);
        assert_eq!(net.station_of(packets[0].node), Some(BaseStationId(1)));
    }

    #[test]
    fn flow_key_uses_udp_five_tuple() {
        let (_, packets) = network(CellularConfig::default(), 1, &[0]);
        let key = packets[0].flow_key();
        assert_eq!(key.to_string(), "7.0.0.2:49153 -> 1.0.0.2:8080 (UDP)");
    }
}

// ── Loss ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loss {
    use super::*;

    fn lossy(rate: f64) -> CellularConfig {
        CellularConfig { loss_rate: rate, ..CellularConfig::default() }
    }

    fn fates(rate: f64, seed: u64, n: u64) -> Vec<bool> {
        let mut net = CellularNetwork::new(lossy(rate), 1, seed).unwrap();
        let node = net.create_node();
        net.attach(node, BaseStationId(0)).unwrap();
        let addr = net.assign_address(node).unwrap();
        let p = Packet::udp(node, Endpoint::new(addr, EPHEMERAL_PORT), server(), 64);
        (0..n)
            .map(|i| net.send(SimTime::from_secs(i), &p).unwrap() == Transit::Drop)
            .collect()
    }

    #[test]
    fn total_loss_drops_everything() {
        assert!(fates(1.0, 1, 50).into_iter().all(|dropped| dropped));
    }

    #[test]
    fn zero_loss_drops_nothing() {
        assert!(fates(0.0, 1, 50).into_iter().all(|dropped| !dropped));
    }

    #[test]
    fn loss_is_seeded() {
        assert_eq!(fates(0.3, 99, 200), fates(0.3, 99, 200));
        let dropped = fates(0.3, 99, 2_000).into_iter().filter(|d| *d).count();
        assert!((400..800).contains(&dropped), "dropped {dropped} of 2000");
    }

    #[test]
    fn drops_are_counted_per_cell() {
        let mut net = CellularNetwork::new(lossy(1.0), 1, 0).unwrap();
        let node = net.create_node();
        net.attach(node, BaseStationId(0)).unwrap();
        let addr = net.assign_address(node).unwrap();
        let p = Packet::udp(node, Endpoint::new(addr, EPHEMERAL_PORT), server(), 64);
        net.send(SimTime::ZERO, &p).unwrap();
        let load = net.cell_load(BaseStationId(0)).unwrap();
        assert_eq!((load.sent, load.dropped), (1, 1));
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = CellularConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.backhaul_latency().unwrap(), Duration::from_millis(50));
    }

    #[test]
    fn bad_values_rejected() {
        for cfg in [
            CellularConfig { loss_rate: 1.5, ..CellularConfig::default() },
            CellularConfig { loss_rate: -0.1, ..CellularConfig::default() },
            CellularConfig { loss_rate: f64::NAN, ..CellularConfig::default() },
            CellularConfig { uplink_bps: 0, ..CellularConfig::default() },
            CellularConfig { radio_latency_ms: -1.0, ..CellularConfig::default() },
        ] {
            assert!(cfg.validate().is_err(), "{cfg:?}");
            assert!(CellularNetwork::new(cfg, 1, 0).is_err());
        }
    }

    #[test]
    fn zero_base_stations_rejected() {
        assert!(CellularNetwork::new(CellularConfig::default(), 0, 0).is_err());
    }
}
