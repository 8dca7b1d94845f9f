//! Hawkeye PC reuse predictor.
//!
//! A direct-mapped table of saturating counters indexed by a CRC mix of the
//! PC. OPTgen verdicts train it: a PC whose previous line OPT would have kept
//! is increased, one whose line OPT would have dropped is decreased. The
//! forecast is "cache-friendly" when the counter sits at or above its
//! midpoint. Entries that were never trained forecast friendly.

use crate::common::SaturatingCounter;
use crate::common::hash::table_index;

/// PC-indexed reuse predictor.
#[derive(Clone, Debug)]
pub struct ReusePredictor {
    /// `None` until the bucket is first trained.
    table: Vec<Option<SaturatingCounter>>,
    /// Counter saturation bound.
    max: u16,
}

impl ReusePredictor {
    /// Creates an untrained predictor with `size` buckets of `0..=max` counters.
    pub fn new(size: usize, max: u16) -> Self {
        Self {
            table: vec![None; size],
            max,
        }
    }

    /// Forgets all training.
    pub fn reset(&mut self) {
        self.table.fill(None);
    }

    #[inline(always)]
    fn index(&self, pc: u64) -> usize {
        table_index(pc, self.table.len())
    }

    /// Forecast for lines inserted by `pc`.
    pub fn predict(&self, pc: u64) -> bool {
        self.table[self.index(pc)].is_none_or(|counter| counter.is_at_least_midpoint())
    }

    /// Trains `pc` toward cache-friendly.
    pub fn increase(&mut self, pc: u64) {
        self.entry(pc).increment();
    }

    /// Trains `pc` toward cache-averse.
    pub fn decrease(&mut self, pc: u64) {
        self.entry(pc).decrement();
    }

    /// Counter for `pc`'s bucket, created at the midpoint on first touch.
    fn entry(&mut self, pc: u64) -> &mut SaturatingCounter {
        let index = self.index(pc);
        let max = self.max;
        self.table[index].get_or_insert_with(|| SaturatingCounter::at_midpoint(max))
    }

    /// Counter value for `pc`, or `None` when its bucket is untrained.
    pub fn counter(&self, pc: u64) -> Option<u16> {
        self.table[self.index(pc)].map(|counter| counter.value())
    }

    /// Counter saturation bound.
    pub const fn max(&self) -> u16 {
        self.max
    }

    /// Buckets trained at least once.
    pub fn trained_entries(&self) -> usize {
        self.table.iter().filter(|entry| entry.is_some()).count()
    }
}
