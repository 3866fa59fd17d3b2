//! Unit tests for cw-flow.

use std::net::Ipv4Addr;

use cw_core::{Endpoint, FlowId, SimTime};

use crate::{FlowKey, FlowRecorder, Protocol};

fn key(last_octet: u8) -> FlowKey {
    FlowKey::new(
        Endpoint::new(Ipv4Addr::new(7, 0, 0, last_octet), 49153),
        Endpoint::new(Ipv4Addr::new(1, 0, 0, 2), 8080),
        Protocol::Udp,
    )
}

fn ms(n: u64) -> SimTime {
    SimTime::from_millis(n)
}

#[cfg(test)]
mod keys {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(key(2).to_string(), "7.0.0.2:49153 -> 1.0.0.2:8080 (UDP)");
        assert_eq!(Protocol::Udp.number(), 17);
    }

    #[test]
    fn endpoints_roundtrip() {
        let k = key(9);
        assert_eq!(k.source(), Endpoint::new(Ipv4Addr::new(7, 0, 0, 9), 49153));
        assert_eq!(k.destination().port, 8080);
    }
}

#[cfg(test)]
mod recorder {
    use super::*;

    #[test]
    fn flows_created_lazily_from_one() {
        let mut r = FlowRecorder::new();
        assert!(r.is_empty());
        assert_eq!(r.on_transmit(key(2), ms(0), 256), FlowId(1));
        assert_eq!(r.on_transmit(key(3), ms(0), 256), FlowId(2));
        assert_eq!(r.on_transmit(key(2), ms(30), 256), FlowId(1));
        assert_eq!(r.len(), 2);
        assert_eq!(r.flow_id(&key(3)), Some(FlowId(2)));
        assert_eq!(r.flow_id(&key(4)), None);
    }

    #[test]
    fn counts_and_delay() {
        let mut r = FlowRecorder::new();
        let k = key(2);
        r.on_transmit(k, ms(0), 256);
        r.on_transmit(k, ms(100), 256);
        r.on_transmit(k, ms(200), 256);
        r.on_receive(k, ms(0), ms(60), 256);
        r.on_receive(k, ms(100), ms(180), 256);

        let s = r.stats(FlowId(1)).unwrap();
        assert_eq!(s.tx_packets, 3);
        assert_eq!(s.rx_packets, 2);
        assert_eq!(s.lost(), 1);
        assert_eq!(s.tx_bytes, 768);
        assert_eq!(s.rx_bytes, 512);
        assert_eq!(s.delay_sum_nanos, 140_000_000);
        assert_eq!(s.first_tx, Some(ms(0)));
        assert_eq!(s.last_rx, Some(ms(180)));
        assert_eq!(s.mean_delay().unwrap().as_millis(), 70);
    }

    #[test]
    fn unknown_id_is_none() {
        let r = FlowRecorder::new();
        assert!(r.stats(FlowId(1)).is_none());
        assert!(r.stats(FlowId(0)).is_none());
        assert!(r.stats(FlowId::INVALID).is_none());
    }

    #[test]
    fn snapshot_is_ordered_and_detached() {
        let mut r = FlowRecorder::new();
        r.on_transmit(key(5), ms(0), 1);
        r.on_transmit(key(2), ms(0), 1);
        let snap = r.snapshot();
        r.on_transmit(key(5), ms(1), 1);

        let ids: Vec<FlowId> = snap.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![FlowId(1), FlowId(2)]);
        assert_eq!(snap.get(FlowId(1)).unwrap().stats.tx_packets, 1);
        assert_eq!(snap.find(&key(2)).unwrap().id, FlowId(2));
        assert_eq!(r.into_snapshot().get(FlowId(1)).unwrap().stats.tx_packets, 2);
    }
}

#[cfg(test)]
mod aggregation {
    use super::*;
    use crate::{DeliveryVerdict, FlowSnapshot, WanVerdict, aggregate};

    #[test]
    fn empty_snapshot_is_all_zero() {
        let s = aggregate(&FlowSnapshot::default());
        assert_eq!(s.total_tx, 0);
        assert_eq!(s.packet_delivery_ratio, 0.0);
        assert_eq!(s.mean_delay_ms, 0.0);
    }

    #[test]
    fn tx_without_rx_has_zero_delay() {
        let mut r = FlowRecorder::new();
        r.on_transmit(key(2), ms(0), 10);
        let s = r.snapshot().aggregate();
        assert_eq!(s.total_tx, 1);
        assert_eq!(s.packet_delivery_ratio, 0.0);
        assert_eq!(s.mean_delay_ms, 0.0);
        assert_eq!(s.delivery_verdict(), DeliveryVerdict::Degraded);
    }

    #[test]
    fn full_delivery_is_exactly_100() {
        let mut r = FlowRecorder::new();
        for i in 0..50u8 {
            let k = key(i + 2);
            for t in 0..7u64 {
                r.on_transmit(k, ms(t * 30_000), 256);
                r.on_receive(k, ms(t * 30_000), ms(t * 30_000 + 75), 256);
            }
        }
        let s = r.snapshot().aggregate();
        assert_eq!(s.flows, 50);
        assert_eq!(s.total_tx, 350);
        assert_eq!(s.packet_delivery_ratio, 100.0);
        assert_eq!(s.lost, 0);
    }

    #[test]
    fn uniform_delay_is_exact() {
        for d in [1u64, 60, 75, 333] {
            let mut r = FlowRecorder::new();
            for i in 0..13u64 {
                let k = key((i % 4) as u8 + 2);
                r.on_transmit(k, ms(i * 7), 64);
                r.on_receive(k, ms(i * 7), ms(i * 7 + d), 64);
            }
            assert_eq!(r.snapshot().aggregate().mean_delay_ms, d as f64);
        }
    }

    #[test]
    fn pdr_stays_in_range() {
        let mut r = FlowRecorder::new();
        for i in 0..10u64 {
            r.on_transmit(key(2), ms(i), 1);
            if i % 3 == 0 {
                r.on_receive(key(2), ms(i), ms(i + 5), 1);
            }
        }
        let s = r.snapshot().aggregate();
        assert_eq!(s.total_rx, 4);
        assert_eq!(s.lost, 6);
        assert!((0.0..=100.0).contains(&s.packet_delivery_ratio));
        assert_eq!(s.packet_delivery_ratio, 40.0);
    }

    #[test]
    fn verdict_thresholds() {
        let mut r = FlowRecorder::new();
        for i in 0..10u64 {
            r.on_transmit(key(2), ms(i), 1);
            r.on_receive(key(2), ms(i), ms(i + 250), 1);
        }
        let s = r.snapshot().aggregate();
        assert_eq!(s.delivery_verdict(), DeliveryVerdict::Success);
        assert_eq!(s.wan_verdict(), WanVerdict::Acceptable);
        assert_eq!(s.delivery_verdict().to_string(), "SUCCESS");
        assert_eq!(s.wan_verdict().to_string(), "ACCEPTABLE");
    }
}
