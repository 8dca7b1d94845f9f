//! Re-Reference Interval Prediction (RRIP).
//!
//! Every line carries a small saturating re-reference prediction value (RRPV):
//! `0` means "re-referenced soon", `rrpv_max` means "distant", i.e. next victim.
//! A victim is only ever chosen among lines at `rrpv_max`; when none qualifies,
//! every line in the set ages by one and the scan repeats.
//!
//! [`RripState`] is the shared per-line store used by SRRIP, DRRIP, SHiP and
//! Hawkeye. [`SrripPolicy`] is the static baseline: hits promote to `0`, fills
//! insert at `rrpv_max - 1`.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(1)
//!   - `get_victim()`: O(W × (M + 1)) worst case, W ways and M = `rrpv_max`
//! - **Space Complexity:** O(S × W) bytes

use super::ReplacementPolicy;
use crate::common::AccessType;
use crate::config::{Geometry, PolicyKind, RripConfig};
use crate::stats::{AccessCounters, PolicyStats};

/// Per-line RRPV store for a whole cache.
#[derive(Clone, Debug)]
pub struct RripState {
    /// Flat `sets × ways` array of RRPVs.
    rrpv: Vec<u8>,
    /// Number of ways in the cache.
    ways: usize,
    /// Distant re-reference value.
    max: u8,
}

impl RripState {
    /// Creates a store with every line at `max` (all lines are victims).
    pub fn new(geometry: Geometry, max: u8) -> Self {
        Self {
            rrpv: vec![max; geometry.lines()],
            ways: geometry.ways,
            max,
        }
    }

    /// Puts every line back at `max`.
    pub fn reset(&mut self) {
        self.rrpv.fill(self.max);
    }

    /// Distant re-reference value.
    #[inline(always)]
    pub const fn max(&self) -> u8 {
        self.max
    }

    /// Associativity.
    #[inline(always)]
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// RRPV of one line.
    #[inline(always)]
    pub fn rrpv(&self, set: usize, way: usize) -> u8 {
        self.rrpv[set * self.ways + way]
    }

    /// Overwrites the RRPV of one line, clamped to `max`.
    #[inline(always)]
    pub fn set_rrpv(&mut self, set: usize, way: usize, value: u8) {
        self.rrpv[set * self.ways + way] = value.min(self.max);
    }

    /// RRPVs of every way in `set`.
    pub fn lines(&self, set: usize) -> &[u8] {
        let base = set * self.ways;
        &self.rrpv[base..base + self.ways]
    }

    fn lines_mut(&mut self, set: usize) -> &mut [u8] {
        let base = set * self.ways;
        &mut self.rrpv[base..base + self.ways]
    }

    /// Finds the first way at `max`, aging the whole set until one exists.
    ///
    /// Terminates after at most `max` aging passes: each pass raises every
    /// line below `max` by one, so the line with the highest RRPV reaches
    /// `max` first.
    pub fn find_victim(&mut self, set: usize) -> usize {
        let max = self.max;
        let lines = self.lines_mut(set);
        loop {
            if let Some(way) = lines.iter().position(|&rrpv| rrpv == max) {
                return way;
            }
            for rrpv in lines.iter_mut() {
                if *rrpv < max {
                    *rrpv += 1;
                }
            }
        }
    }

    /// Marks a line as re-referenced soon.
    #[inline(always)]
    pub fn promote(&mut self, set: usize, way: usize) {
        self.set_rrpv(set, way, 0);
    }

    /// Ages cache-friendly lines unless one is already at `max - 1`.
    ///
    /// Lines below `max - 1` are raised by one; lines at `max - 1` or `max`
    /// are left alone. When any line already sits at `max - 1` the pass is
    /// skipped entirely, so repeated friendly fills never push lines to
    /// `max` through this path. Order-dependent by construction.
    pub fn age_unsaturated(&mut self, set: usize) {
        let near = self.max - 1;
        let lines = self.lines_mut(set);
        if lines.contains(&near) {
            return;
        }
        for rrpv in lines.iter_mut() {
            if *rrpv < near {
                *rrpv += 1;
            }
        }
    }
}

/// SRRIP Policy state.
#[derive(Clone, Debug)]
pub struct SrripPolicy {
    /// Per-line RRPVs.
    state: RripState,
    /// Hit/access bookkeeping.
    counters: AccessCounters,
}

impl SrripPolicy {
    /// Creates a new SRRIP policy instance.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Cache sets and ways.
    /// * `config` - RRPV width.
    pub fn new(geometry: Geometry, config: &RripConfig) -> Self {
        Self {
            state: RripState::new(geometry, config.rrpv_max),
            counters: AccessCounters::default(),
        }
    }

    /// Read access to the per-line RRPVs.
    pub const fn state(&self) -> &RripState {
        &self.state
    }
}

impl ReplacementPolicy for SrripPolicy {
    fn init(&mut self) {
        self.state.reset();
        self.counters.reset();
    }

    fn get_victim(&mut self, set: usize) -> usize {
        self.state.find_victim(set)
    }

    /// Hits promote to `0`; fills insert at `max - 1` ("long" interval).
    fn update(
        &mut self,
        set: usize,
        way: usize,
        _pc: u64,
        _address: u64,
        kind: AccessType,
        hit: bool,
    ) {
        self.counters.record(kind.is_writeback(), hit);
        if hit {
            self.state.promote(set, way);
        } else {
            let long = self.state.max() - 1;
            self.state.set_rrpv(set, way, long);
        }
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats::new(PolicyKind::Srrip.name(), self.counters)
    }
}
