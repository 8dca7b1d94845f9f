//! Hawkeye Replacement Policy.
//!
//! Hawkeye learns from Belady's OPT applied to the past. Every non-writeback
//! access is paired, through the set's sampled history, with the previous
//! access to the same address. OPTgen decides whether OPT would have kept the
//! line across that interval, and the verdict trains the PC that made the
//! *previous* access. The trained predictor then classifies the *current* PC:
//!
//! - **Cache-averse:** the line is inserted at `max` and is the next victim.
//! - **Cache-friendly:** the line is set to `0`; on a miss, the other
//!   friendly lines in the set are aged first (skipped if one already sits at
//!   `max - 1`), so older friendly lines drift toward eviction.
//!
//! Victim selection is the shared RRIP scan-and-age loop and never touches
//! the predictor.
//!
//! Time is kept per set: a clock counts non-wrapping non-writeback accesses
//! and OPTgen sees it modulo `window`. The set timer exposed to hosts is that
//! clock modulo `timer_size`. An interval longer than the window cannot be
//! judged and counts as "not cacheable", however many timer cycles it spans.

/// Sampled address history.
pub mod history;

/// Bounded-window Belady emulator.
pub mod optgen;

/// PC-indexed reuse predictor.
pub mod predictor;

pub use history::{HistoryEntry, Lookup, SampledHistory};
pub use optgen::OptGen;
pub use predictor::ReusePredictor;

use super::ReplacementPolicy;
use super::rrip::RripState;
use crate::common::AccessType;
use crate::common::hash::crc_mix;
use crate::config::{Geometry, HawkeyeConfig, PolicyKind};
use crate::stats::{AccessCounters, PolicyStats};

/// Ways OPT is denied relative to the real cache.
const OPT_CAPACITY_MARGIN: usize = 2;

/// Hawkeye Policy state.
#[derive(Clone, Debug)]
pub struct HawkeyePolicy {
    /// Per-line RRPVs.
    state: RripState,
    /// One OPT emulator per set.
    optgen: Vec<OptGen>,
    /// Per-set previous-access memory.
    history: SampledHistory,
    /// PC-indexed reuse predictor.
    predictor: ReusePredictor,
    /// Per-set access count since `init`.
    clocks: Vec<u64>,
    /// OPTgen window length.
    window: usize,
    /// Timer modulus.
    timer_size: u64,
    /// log2 of the line size.
    line_shift: u32,
    /// Capacity OPT is emulated with.
    opt_capacity: u32,
    /// Hit/access bookkeeping.
    counters: AccessCounters,
}

impl HawkeyePolicy {
    /// Creates a new Hawkeye policy instance.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Cache sets and ways; OPT is emulated with `ways - 2`.
    /// * `config` - Predictor, window, and timer parameters.
    pub fn new(geometry: Geometry, config: &HawkeyeConfig) -> Self {
        let opt_capacity = geometry.ways.saturating_sub(OPT_CAPACITY_MARGIN) as u32;
        Self {
            state: RripState::new(geometry, config.rrpv_max),
            optgen: vec![OptGen::new(config.window, opt_capacity); geometry.sets],
            history: SampledHistory::new(geometry.sets, geometry.ways),
            predictor: ReusePredictor::new(config.predictor_size, config.predictor_max),
            clocks: vec![0; geometry.sets],
            window: config.window,
            timer_size: config.timer_size,
            line_shift: config.line_shift,
            opt_capacity,
            counters: AccessCounters::default(),
        }
    }

    /// Sampled-history tag of `address`: CRC mix of its block address.
    #[inline(always)]
    pub const fn address_tag(&self, address: u64) -> u32 {
        crc_mix(address >> self.line_shift) as u32
    }

    /// Read access to the per-line RRPVs.
    pub const fn state(&self) -> &RripState {
        &self.state
    }

    /// Read access to the predictor.
    pub const fn predictor(&self) -> &ReusePredictor {
        &self.predictor
    }

    /// Read access to the sampled history.
    pub const fn history(&self) -> &SampledHistory {
        &self.history
    }

    /// OPT emulator of `set`.
    pub fn optgen(&self, set: usize) -> &OptGen {
        &self.optgen[set]
    }

    /// Current timer value of `set`, modulo `timer_size`.
    pub fn timer(&self, set: usize) -> u64 {
        self.clocks[set] % self.timer_size
    }

    /// Non-writeback accesses seen by `set` since `init`.
    pub fn clock(&self, set: usize) -> u64 {
        self.clocks[set]
    }

    /// Replays this access through the sampled history and OPTgen, training
    /// the predictor with the verdict on the previous access to the tag.
    fn train(&mut self, set: usize, tag: u32, pc: u64) {
        let window = self.window as u64;
        let now = self.clocks[set];
        let quanta = (now % window) as usize;

        match self.history.lookup_or_init(set, tag, now) {
            Lookup::Inserted => self.optgen[set].add_access(quanta),
            Lookup::Present(previous) => {
                let last_quanta = (previous.last_time % window) as usize;
                let wrapped = now.saturating_sub(previous.last_time) > window;
                if !wrapped && self.optgen[set].should_cache(quanta, last_quanta) {
                    self.predictor.increase(previous.pc);
                } else {
                    self.predictor.decrease(previous.pc);
                }
                self.optgen[set].add_access(quanta);
            }
        }

        let predicted = self.predictor.predict(pc);
        self.history.update(set, tag, now, pc, predicted);
        self.clocks[set] = now + 1;
    }
}

impl ReplacementPolicy for HawkeyePolicy {
    fn init(&mut self) {
        self.state.reset();
        for optgen in &mut self.optgen {
            optgen.init(self.opt_capacity);
        }
        self.history.reset();
        self.predictor.reset();
        self.clocks.fill(0);
        self.counters.reset();
        tracing::debug!(
            sets = self.clocks.len(),
            opt_capacity = self.opt_capacity,
            window = self.window,
            "hawkeye state initialized"
        );
    }

    fn get_victim(&mut self, set: usize) -> usize {
        self.state.find_victim(set)
    }

    fn update(
        &mut self,
        set: usize,
        way: usize,
        pc: u64,
        address: u64,
        kind: AccessType,
        hit: bool,
    ) {
        self.counters.record(kind.is_writeback(), hit);
        if kind.is_writeback() {
            return;
        }

        let tag = self.address_tag(address);
        self.train(set, tag, pc);

        if !self.predictor.predict(pc) {
            let max = self.state.max();
            self.state.set_rrpv(set, way, max);
            return;
        }

        self.state.promote(set, way);
        if !hit {
            self.state.age_unsaturated(set);
        }
        self.state.promote(set, way);
    }

    fn stats(&self) -> PolicyStats {
        let opt_hits = self.optgen.iter().map(OptGen::opt_hits).sum();
        let opt_accesses = self.optgen.iter().map(OptGen::demand_accesses).sum();
        PolicyStats {
            opt_hits: Some(opt_hits),
            opt_accesses: Some(opt_accesses),
            trained_entries: Some(self.predictor.trained_entries()),
            ..PolicyStats::new(PolicyKind::Hawkeye.name(), self.counters)
        }
    }
}
