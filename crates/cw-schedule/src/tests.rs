//! Unit tests for cw-schedule.

use std::convert::Infallible;
use std::time::Duration;

use cw_core::{DeviceId, SimTime};

use crate::Scheduler;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Drain to `stop`, recording `(time, label)` for every fired event.
fn drain(sched: &mut Scheduler<&'static str>, stop: SimTime) -> Vec<(SimTime, &'static str)> {
    let mut fired = Vec::new();
    sched
        .run_until(stop, |_, ev| -> Result<(), Infallible> {
            fired.push((ev.time, ev.action));
            Ok(())
        })
        .unwrap();
    fired
}

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

// ── Ordering ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ordering {
    use super::*;

    #[test]
    fn earlier_fires_first() {
        let mut s = Scheduler::new();
        s.schedule(secs(5), None, "late");
        s.schedule(secs(1), None, "early");
        s.schedule(secs(3), None, "middle");
        let fired: Vec<_> = drain(&mut s, SimTime::from_secs(10)).into_iter().map(|f| f.1).collect();
        assert_eq!(fired, vec!["early", "middle", "late"]);
    }

    #[test]
    fn equal_times_fire_fifo() {
        for _ in 0..20 {
            let mut s = Scheduler::new();
            s.schedule(secs(2), None, "A");
            s.schedule(secs(2), None, "B");
            s.schedule(secs(2), None, "C");
            let fired: Vec<_> = drain(&mut s, SimTime::from_secs(2)).into_iter().map(|f| f.1).collect();
            assert_eq!(fired, vec!["A", "B", "C"]);
        }
    }

    #[test]
    fn clock_tracks_fired_event() {
        let mut s = Scheduler::new();
        s.schedule(secs(4), None, "x");
        let mut seen = None;
        s.run_until(SimTime::from_secs(10), |sched, ev| -> Result<(), Infallible> {
            seen = Some((sched.now(), ev.time));
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, Some((SimTime::from_secs(4), SimTime::from_secs(4))));
        assert_eq!(s.now(), SimTime::from_secs(10));
    }

    #[test]
    fn schedule_at_past_is_rejected() {
        let mut s: Scheduler<&str> = Scheduler::new();
        drain(&mut s, SimTime::from_secs(5));
        assert!(s.schedule_at(SimTime::from_secs(4), None, "old").is_err());
        assert!(s.schedule_at(SimTime::from_secs(5), None, "now").is_ok());
    }
}

// ── Stop boundary ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod stop_boundary {
    use super::*;

    #[test]
    fn event_at_stop_fires_later_does_not() {
        let mut s = Scheduler::new();
        s.schedule(secs(10), None, "at-stop");
        s.schedule(secs(11), None, "after-stop");
        let fired = drain(&mut s, SimTime::from_secs(10));
        assert_eq!(fired, vec![(SimTime::from_secs(10), "at-stop")]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.discard_pending(), 1);
        assert!(s.is_empty());
    }

    #[test]
    fn follow_ups_inside_window_fire() {
        // A self-rescheduling action every 3 s from t=0 up to t=10.
        let mut s = Scheduler::new();
        s.schedule(Duration::ZERO, None, "tick");
        let mut times = Vec::new();
        s.run_until(SimTime::from_secs(10), |sched, ev| -> Result<(), Infallible> {
            times.push(ev.time);
            sched.schedule(secs(3), None, "tick");
            Ok(())
        })
        .unwrap();
        assert_eq!(
            times,
            vec![
                SimTime::from_secs(0),
                SimTime::from_secs(3),
                SimTime::from_secs(6),
                SimTime::from_secs(9),
            ]
        );
        assert_eq!(s.next_time(), Some(SimTime::from_secs(12)));
    }

    #[test]
    fn handler_error_aborts_drain() {
        let mut s = Scheduler::new();
        s.schedule(secs(1), None, "ok");
        s.schedule(secs(2), None, "bad");
        s.schedule(secs(3), None, "never");
        let result = s.run_until(SimTime::from_secs(10), |_, ev| {
            if ev.action == "bad" { Err("boom") } else { Ok(()) }
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(s.len(), 1);
        assert_eq!(s.now(), SimTime::from_secs(2));
    }

    #[test]
    fn run_until_counts_fired() {
        let mut s = Scheduler::new();
        for i in 0..5 {
            s.schedule(secs(i), None, "e");
        }
        let n = s.run_until(SimTime::from_secs(2), |_, _| -> Result<(), Infallible> { Ok(()) });
        assert_eq!(n, Ok(3));
        assert_eq!(s.fired(), 3);
    }
}

// ── Cancellation ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod cancellation {
    use super::*;

    #[test]
    fn cancelled_event_never_fires() {
        let mut s = Scheduler::new();
        let h = s.schedule(secs(1), None, "cancelled");
        s.schedule(secs(1), None, "kept");
        assert!(s.cancel(h));
        let fired: Vec<_> = drain(&mut s, SimTime::from_secs(5)).into_iter().map(|f| f.1).collect();
        assert_eq!(fired, vec!["kept"]);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut s = Scheduler::new();
        let h = s.schedule(secs(1), None, "x");
        assert!(s.is_pending(h));
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        assert!(!s.is_pending(h));
    }

    #[test]
    fn cancel_after_fire_is_noop() {
        let mut s = Scheduler::new();
        let h = s.schedule(secs(1), None, "x");
        s.schedule(secs(2), None, "y");
        drain(&mut s, SimTime::from_secs(1));
        assert!(!s.cancel(h));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn cancel_due_event_from_inside_handler() {
        // Both due at t=1; the first cancels the second before it is popped.
        let mut s = Scheduler::new();
        s.schedule(secs(1), None, "first");
        let victim = s.schedule(secs(1), None, "second");
        let mut fired = Vec::new();
        s.run_until(SimTime::from_secs(1), |sched, ev| -> Result<(), Infallible> {
            fired.push(ev.action);
            sched.cancel(victim);
            Ok(())
        })
        .unwrap();
        assert_eq!(fired, vec!["first"]);
    }

    #[test]
    fn pending_for_counts_owner() {
        let mut s = Scheduler::new();
        s.schedule(secs(1), Some(DeviceId(0)), "a");
        s.schedule(secs(2), Some(DeviceId(0)), "b");
        s.schedule(secs(2), Some(DeviceId(1)), "c");
        s.schedule(secs(3), None, "net");
        assert_eq!(s.pending_for(DeviceId(0)), 2);
        assert_eq!(s.pending_for(DeviceId(1)), 1);
    }

    #[test]
    fn handle_reports_fire_time() {
        let mut s: Scheduler<()> = Scheduler::new();
        let h = s.schedule(Duration::from_millis(1_500), None, ());
        assert_eq!(h.fire_time(), SimTime::from_millis(1_500));
        let ev = s.pop_due(SimTime::from_secs(2)).unwrap();
        assert_eq!(ev.handle(), h);
    }
}
