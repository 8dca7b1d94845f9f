//! Dynamic Insertion Policy (DIP).
//!
//! DIP keeps true LRU victim selection and duels two insertion positions:
//! - **LRU insertion (policy A):** fills go to the MRU position.
//! - **BIP (policy B):** fills go to the LRU position, except one in
//!   `rare_insertion_odds` which goes to MRU.
//!
//! Lines inserted at LRU are the next victim unless they hit first, which
//! protects the working set from scans larger than the cache.

use rand::RngCore;

use super::ReplacementPolicy;
use super::dueling::SetDueling;
use super::lru::LruStack;
use crate::common::AccessType;
use crate::config::{DuelingConfig, Geometry, PolicyKind};
use crate::stats::{AccessCounters, PolicyStats};

/// DIP Policy state.
#[derive(Clone, Debug)]
pub struct DipPolicy<R> {
    stack: LruStack,
    dueling: SetDueling,
    rng: R,
    rare_odds: u32,
    counters: AccessCounters,
}

impl<R: RngCore> DipPolicy<R> {
    /// Creates a new DIP policy instance.
    ///
    /// # Panics
    ///
    /// Panics if `dueling.rare_insertion_odds` is zero.
    pub fn with_rng(geometry: Geometry, dueling: &DuelingConfig, rng: R) -> Self {
        assert!(
            dueling.rare_insertion_odds > 0,
            "BIP rare insertion odds must be non-zero"
        );
        Self {
            stack: LruStack::new(geometry.sets, geometry.ways),
            dueling: SetDueling::new(dueling),
            rng,
            rare_odds: dueling.rare_insertion_odds,
            counters: AccessCounters::default(),
        }
    }

    /// Read access to the usage stacks.
    pub const fn stack(&self) -> &LruStack {
        &self.stack
    }

    /// Read access to the duel.
    pub const fn dueling(&self) -> &SetDueling {
        &self.dueling
    }

    fn bip_inserts_at_mru(&mut self) -> bool {
        self.rng.next_u32() % self.rare_odds == 0
    }
}

impl<R: RngCore + Send + Sync> ReplacementPolicy for DipPolicy<R> {
    fn init(&mut self) {
        self.stack.reset();
        self.dueling.reset();
        self.counters.reset();
    }

    fn get_victim(&mut self, set: usize) -> usize {
        self.stack.victim(set)
    }

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
            self.dueling.record_hit(set);
            self.stack.promote(set, way);
            return;
        }

        if self.dueling.uses_policy_a(set) || self.bip_inserts_at_mru() {
            self.stack.promote(set, way);
        } else {
            self.stack.demote(set, way);
        }
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            psel: Some(self.dueling.psel()),
            ..PolicyStats::new(PolicyKind::Dip.name(), self.counters)
        }
    }
}
