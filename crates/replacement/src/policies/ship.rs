//! Signature-based Hit Predictor (SHiP).
//!
//! SHiP learns, per PC signature, whether lines brought in by that PC tend to
//! be reused before eviction. Each line remembers the signature that filled it
//! and whether it has been hit since. When a line is replaced the outcome
//! trains the signature history counter table (SHCT): reused lines increment
//! their signature's counter, dead lines decrement it. A new line is inserted
//! at `max` (next victim) when its signature's counter is zero, and at `0`
//! otherwise.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(1)
//!   - `get_victim()`: same as RRIP
//! - **Space Complexity:** O(S × W) line metadata + O(T) SHCT entries

use super::ReplacementPolicy;
use super::rrip::RripState;
use crate::common::hash::fold_signature;
use crate::common::{AccessType, SaturatingCounter};
use crate::config::{Geometry, PolicyKind, ShipConfig};
use crate::stats::{AccessCounters, PolicyStats};

/// Metadata SHiP keeps next to each line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct LineSignature {
    /// SHCT index of the filling PC; `None` until the line is first filled.
    signature: Option<usize>,
    /// Hit since fill.
    reused: bool,
}

/// SHiP Policy state.
#[derive(Clone, Debug)]
pub struct ShipPolicy {
    state: RripState,
    lines: Vec<LineSignature>,
    shct: Vec<SaturatingCounter>,
    mask: usize,
    ways: usize,
    counters: AccessCounters,
}

impl ShipPolicy {
    /// Creates a new SHiP policy instance.
    ///
    /// # Panics
    ///
    /// Panics if `config.table_size` is not a power of two.
    pub fn new(geometry: Geometry, config: &ShipConfig) -> Self {
        assert!(
            config.table_size.is_power_of_two(),
            "SHCT size {} is not a power of two",
            config.table_size
        );
        Self {
            state: RripState::new(geometry, config.rrpv_max),
            lines: vec![LineSignature::default(); geometry.lines()],
            shct: vec![SaturatingCounter::at_midpoint(config.counter_max); config.table_size],
            mask: config.table_size - 1,
            ways: geometry.ways,
            counters: AccessCounters::default(),
        }
    }

    /// SHCT index for `pc`.
    #[inline(always)]
    pub const fn signature(&self, pc: u64) -> usize {
        fold_signature(pc, self.mask)
    }

    /// SHCT counter for `pc`'s signature.
    pub fn counter(&self, pc: u64) -> SaturatingCounter {
        self.shct[self.signature(pc)]
    }

    /// Read access to the per-line RRPVs.
    pub const fn state(&self) -> &RripState {
        &self.state
    }

    /// Whether the line at `(set, way)` has been hit since its fill.
    pub fn is_reused(&self, set: usize, way: usize) -> bool {
        self.lines[set * self.ways + way].reused
    }

    /// Trains the outgoing block's signature with its reuse outcome.
    fn train_outgoing(&mut self, line: LineSignature) {
        if let Some(signature) = line.signature {
            let counter = &mut self.shct[signature];
            if line.reused {
                counter.increment();
            } else {
                counter.decrement();
            }
        }
    }
}

impl ReplacementPolicy for ShipPolicy {
    fn init(&mut self) {
        self.state.reset();
        self.lines.fill(LineSignature::default());
        for counter in &mut self.shct {
            counter.reset_to_midpoint();
        }
        self.counters.reset();
    }

    fn get_victim(&mut self, set: usize) -> usize {
        self.state.find_victim(set)
    }

    fn update(
        &mut self,
        set: usize,
        way: usize,
        pc: u64,
        _address: u64,
        kind: AccessType,
        hit: bool,
    ) {
        self.counters.record(kind.is_writeback(), hit);
        let slot = set * self.ways + way;

        if hit {
            self.lines[slot].reused = true;
            self.state.promote(set, way);
            return;
        }

        let outgoing = self.lines[slot];
        self.train_outgoing(outgoing);

        let signature = self.signature(pc);
        self.lines[slot] = LineSignature {
            signature: Some(signature),
            reused: false,
        };

        let depth = if self.shct[signature].is_zero() {
            self.state.max()
        } else {
            0
        };
        self.state.set_rrpv(set, way, depth);
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats::new(PolicyKind::Ship.name(), self.counters)
    }
}
