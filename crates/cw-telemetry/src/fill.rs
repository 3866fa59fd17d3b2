//! Bin fill level.

use std::ops::Range;

use cw_core::DeviceRng;

/// Integer fill percentage of a bin, always in `[0, 100]`.
///
/// The level only moves up: bins are never emptied during a run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct FillLevel(u8);

impl FillLevel {
    pub const FULL: FillLevel = FillLevel(100);

    /// Range of the initial level drawn at construction.
    pub const INITIAL: Range<u8> = 20..60;

    /// Range of the increment drawn after every report.
    pub const INCREMENT: Range<u8> = 5..20;

    /// A fixed level, clamped to 100.
    pub fn new(percent: u8) -> Self {
        FillLevel(percent.min(100))
    }

    /// Draw an initial level uniformly from [`INITIAL`](Self::INITIAL).
    pub fn random(rng: &mut DeviceRng) -> Self {
        FillLevel(rng.gen_range(Self::INITIAL))
    }

    #[inline]
    pub fn percent(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_full(self) -> bool {
        self.0 >= 100
    }

    /// Add `increment`, saturating at 100.  Returns the level actually gained.
    pub fn advance(&mut self, increment: u8) -> u8 {
        let before = self.0;
        self.0 = self.0.saturating_add(increment).min(100);
        self.0 - before
    }

    /// Add an increment drawn uniformly from [`INCREMENT`](Self::INCREMENT).
    pub fn advance_random(&mut self, rng: &mut DeviceRng) -> u8 {
        let inc = rng.gen_range(Self::INCREMENT);
        self.advance(inc)
    }
}

impl std::fmt::Display for FillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
