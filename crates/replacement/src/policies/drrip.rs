//! Dynamic RRIP (DRRIP) Replacement Policy.
//!
//! DRRIP duels two RRIP insertion rules:
//! - **SRRIP (policy A):** every fill is inserted at `max - 1`.
//! - **BRRIP (policy B):** fills are inserted at `max - 1`, except one in
//!   `rare_insertion_odds` which is inserted at `max`.
//!
//! Hits promote to `0` everywhere. Victim selection is the shared RRIP
//! scan-and-age loop. The random draw of BRRIP comes from an injected
//! [`RngCore`] so tests can force either branch.

use rand::RngCore;

use super::ReplacementPolicy;
use super::dueling::SetDueling;
use super::rrip::RripState;
use crate::common::AccessType;
use crate::config::{DuelingConfig, Geometry, PolicyKind, RripConfig};
use crate::stats::{AccessCounters, PolicyStats};

/// DRRIP Policy state.
#[derive(Clone, Debug)]
pub struct DrripPolicy<R> {
    /// Per-line RRPVs.
    state: RripState,
    /// Leader sets and PSEL.
    dueling: SetDueling,
    /// Source of the BRRIP rare-insertion draw.
    rng: R,
    /// BRRIP takes the rare branch once in this many fills.
    rare_odds: u32,
    /// Hit/access bookkeeping.
    counters: AccessCounters,
}

impl<R: RngCore> DrripPolicy<R> {
    /// Creates a new DRRIP policy instance.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Cache sets and ways.
    /// * `rrip` - RRPV width.
    /// * `dueling` - Leader layout, PSEL width, and rare-insertion odds.
    /// * `rng` - Random source for BRRIP insertions.
    ///
    /// # Panics
    ///
    /// Panics if `dueling.rare_insertion_odds` is zero. [`Config::validate`]
    /// rejects such configurations before [`Engine::new`] gets here.
    ///
    /// [`Config::validate`]: crate::config::Config::validate
    /// [`Engine::new`]: super::Engine::new
    pub fn with_rng(
        geometry: Geometry,
        rrip: &RripConfig,
        dueling: &DuelingConfig,
        rng: R,
    ) -> Self {
        assert!(
            dueling.rare_insertion_odds > 0,
            "BRRIP rare insertion odds must be non-zero"
        );
        Self {
            state: RripState::new(geometry, rrip.rrpv_max),
            dueling: SetDueling::new(dueling),
            rng,
            rare_odds: dueling.rare_insertion_odds,
            counters: AccessCounters::default(),
        }
    }

    /// Read access to the per-line RRPVs.
    pub const fn state(&self) -> &RripState {
        &self.state
    }

    /// Read access to the duel.
    pub const fn dueling(&self) -> &SetDueling {
        &self.dueling
    }

    /// BRRIP insertion depth: `max` on a rare draw, `max - 1` otherwise.
    fn brrip_depth(&mut self) -> u8 {
        let max = self.state.max();
        if self.rng.next_u32() % self.rare_odds == 0 {
            max
        } else {
            max - 1
        }
    }
}

impl<R: RngCore + Send + Sync> ReplacementPolicy for DrripPolicy<R> {
    fn init(&mut self) {
        self.state.reset();
        self.dueling.reset();
        self.counters.reset();
    }

    fn get_victim(&mut self, set: usize) -> usize {
        self.state.find_victim(set)
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
            self.state.promote(set, way);
            self.dueling.record_hit(set);
            return;
        }

        let depth = if self.dueling.uses_policy_a(set) {
            self.state.max() - 1
        } else {
            self.brrip_depth()
        };
        self.state.set_rrpv(set, way, depth);
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            psel: Some(self.dueling.psel()),
            ..PolicyStats::new(PolicyKind::Drrip.name(), self.counters)
        }
    }
}
