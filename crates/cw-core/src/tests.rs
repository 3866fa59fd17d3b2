//! Unit tests for cw-core primitives.

#[cfg(test)]
mod ids {
    use crate::{BaseStationId, DeviceId, FlowId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = DeviceId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(DeviceId::from_index(42), Some(id));
        assert_eq!(DeviceId::from_index(u32::MAX as usize), None);
    }

    #[test]
    fn ordering() {
        assert!(DeviceId(0) < DeviceId(1));
        assert!(BaseStationId(1) > BaseStationId(0));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(DeviceId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(FlowId::default(), FlowId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(DeviceId(7).to_string(), "dev#7");
        assert_eq!(BaseStationId(1).to_string(), "bs#1");
    }
}

#[cfg(test)]
mod time {
    use std::time::Duration;

    use crate::{SimClock, SimTime, secs_to_duration};

    #[test]
    fn integer_arithmetic_is_exact() {
        let t = SimTime::from_secs_f64(2.0).unwrap();
        let interval = Duration::from_secs(30);
        assert_eq!(t + interval + interval, SimTime::from_secs(62));
    }

    #[test]
    fn subtraction_saturates() {
        let a = SimTime::from_millis(10);
        let b = SimTime::from_millis(60);
        assert_eq!(b - a, Duration::from_millis(50));
        assert_eq!(a - b, Duration::ZERO);
    }

    #[test]
    fn secs_conversion_rejects_bad_input() {
        assert!(secs_to_duration(-1.0).is_none());
        assert!(secs_to_duration(f64::NAN).is_none());
        assert_eq!(secs_to_duration(0.1), Some(Duration::from_millis(100)));
        assert!(SimTime::from_secs_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn display_in_seconds() {
        assert_eq!(SimTime::from_millis(2_500).to_string(), "2.500s");
    }

    #[test]
    fn clock_advances() {
        let mut clock = SimClock::new();
        assert_eq!(clock.now(), SimTime::ZERO);
        clock.advance_to(SimTime::from_secs(5));
        assert_eq!(clock.now(), SimTime::from_secs(5));
        clock.advance_to(SimTime::from_secs(5));
        assert_eq!(clock.now(), SimTime::from_secs(5));
    }
}

#[cfg(test)]
mod rng {
    use crate::{DeviceId, DeviceRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = DeviceRng::new(12345, DeviceId(0));
        let mut r2 = DeviceRng::new(12345, DeviceId(0));
        for _ in 0..100 {
            let a: u32 = r1.gen_range(0..1_000);
            let b: u32 = r2.gen_range(0..1_000);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_devices_differ() {
        let mut r0 = DeviceRng::new(1, DeviceId(0));
        let mut r1 = DeviceRng::new(1, DeviceId(1));
        let a: Vec<u64> = (0..4).map(|_| r0.gen_range(0..u64::MAX)).collect();
        let b: Vec<u64> = (0..4).map(|_| r1.gen_range(0..u64::MAX)).collect();
        assert_ne!(a, b, "seeds for adjacent devices should diverge");
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        assert!(rng.gen_bool(7.0));
    }

    #[test]
    fn sim_rng_same_seed_same_draws() {
        let mut a = SimRng::new(9);
        let mut b = SimRng::new(9);
        for _ in 0..16 {
            assert_eq!(a.gen_bool(0.5), b.gen_bool(0.5));
        }
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn payload_format() {
        assert_eq!(GeoPoint::NLONGKAK.to_string(), "3.848,11.502");
    }

    #[test]
    fn payload_format_rounds_to_three_decimals() {
        let p = GeoPoint { lat: -0.12345, lon: 100.0 };
        assert_eq!(p.to_string(), "-0.123,100.000");
    }
}

#[cfg(test)]
mod config {
    use std::time::Duration;

    use crate::{CoreError, DeviceClass, ScenarioConfig, SimTime};

    #[test]
    fn defaults_are_valid() {
        let cfg = ScenarioConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.device_count(), 53);
        assert_eq!(cfg.stop_time().unwrap(), SimTime::from_secs(120));
    }

    #[test]
    fn trucks_report_fifteen_times_more_often() {
        let cfg = ScenarioConfig::default();
        let bin = cfg.bins.interval(DeviceClass::Bin).unwrap();
        let truck = cfg.trucks.interval(DeviceClass::Truck).unwrap();
        assert_eq!(bin, truck * 15);
    }

    #[test]
    fn staggered_start() {
        let cfg = ScenarioConfig::default();
        assert_eq!(cfg.bins.start_of(DeviceClass::Bin, 0).unwrap(), SimTime::from_secs(2));
        assert_eq!(
            cfg.bins.start_of(DeviceClass::Bin, 10).unwrap(),
            SimTime::from_secs(3),
        );
        assert_eq!(
            cfg.fleet(DeviceClass::Truck).start_of(DeviceClass::Truck, 2).unwrap(),
            SimTime::from_secs(5),
        );
    }

    #[test]
    fn zero_base_stations_rejected() {
        let cfg = ScenarioConfig { base_stations: 0, ..ScenarioConfig::default() };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn non_positive_interval_rejected() {
        let mut cfg = ScenarioConfig::default();
        cfg.bins.interval_secs = 0.0;
        assert!(cfg.validate().is_err());
        cfg.bins.interval_secs = -3.0;
        assert!(cfg.validate().is_err());
        cfg.bins.interval_secs = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn non_positive_stop_rejected() {
        let cfg = ScenarioConfig { stop_secs: 0.0, ..ScenarioConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_max_reports_rejected() {
        let mut cfg = ScenarioConfig::default();
        cfg.trucks.max_reports = Some(0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn interval_is_exact() {
        let cfg = ScenarioConfig::default();
        assert_eq!(cfg.trucks.interval(DeviceClass::Truck).unwrap(), Duration::from_secs(2));
    }
}

#[cfg(test)]
mod class {
    use crate::DeviceClass;

    #[test]
    fn display() {
        assert_eq!(DeviceClass::Bin.to_string(), "bin");
        assert_eq!(DeviceClass::Truck.to_string(), "truck");
    }
}

#[cfg(test)]
mod endpoint {
    use std::net::Ipv4Addr;

    use crate::Endpoint;

    #[test]
    fn display() {
        let ep = Endpoint::new(Ipv4Addr::new(1, 0, 0, 2), 8080);
        assert_eq!(ep.to_string(), "1.0.0.2:8080");
    }
}
