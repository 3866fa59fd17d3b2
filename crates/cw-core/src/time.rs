//! Virtual time model.
//!
//! # Design
//!
//! Time is an integer count of nanoseconds since simulation start, wrapped in
//! `SimTime`.  Intervals and delays are plain `std::time::Duration`s:
//!
//!   fire_time = now + interval
//!
//! Using an integer as the canonical time unit means all schedule arithmetic
//! is exact (no floating-point drift), so `2.0 s + 30 s + 30 s` lands on
//! exactly `62.0 s` and equal-time ties are real ties.  Seconds as `f64` only
//! appear at the configuration and reporting edges.

use std::fmt;
use std::time::Duration;

const NANOS_PER_SEC: u64 = 1_000_000_000;

// ── SimTime ──────────────────────────────────────────────────────────────────

/// An absolute point in virtual time, in nanoseconds since simulation start.
///
/// A u64 of nanoseconds lasts ~585 years of simulated time.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    #[inline]
    pub const fn from_secs(secs: u64) -> SimTime {
        SimTime(secs * NANOS_PER_SEC)
    }

    #[inline]
    pub const fn from_millis(millis: u64) -> SimTime {
        SimTime(millis * 1_000_000)
    }

    /// Convert fractional seconds, or `None` for negative / non-finite input.
    pub fn from_secs_f64(secs: f64) -> Option<SimTime> {
        secs_to_duration(secs).map(|d| SimTime::ZERO + d)
    }

    #[inline]
    pub fn as_nanos(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / NANOS_PER_SEC as f64
    }

    /// Time elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: SimTime) -> Duration {
        Duration::from_nanos(self.0.saturating_sub(earlier.0))
    }
}

impl std::ops::Add<Duration> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: Duration) -> SimTime {
        let nanos = u64::try_from(rhs.as_nanos()).unwrap_or(u64::MAX);
        SimTime(self.0.saturating_add(nanos))
    }
}

impl std::ops::Sub for SimTime {
    type Output = Duration;
    #[inline]
    fn sub(self, rhs: SimTime) -> Duration {
        self.since(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.as_secs_f64())
    }
}

/// Fractional seconds → `Duration`; `None` for negative, NaN or overflowing
/// values so configuration errors surface instead of panicking.
pub fn secs_to_duration(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs).ok()
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The simulated clock.  Only the scheduler advances it.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    now: SimTime,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock forward to `time`.
    ///
    /// # Panics
    /// Panics in debug mode if `time` is earlier than the current time.
    #[inline]
    pub fn advance_to(&mut self, time: SimTime) {
        debug_assert!(time >= self.now, "clock moved backwards: {} -> {}", self.now, time);
        self.now = self.now.max(time);
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.now)
    }
}
