//! Set Dueling.
//!
//! Two insertion policies compete for adoption by the whole cache. A small,
//! fixed subset of sets (the leaders) always runs policy A, another disjoint
//! subset always runs policy B; every other set is a follower. A shared
//! saturating policy selector (PSEL) moves toward A on every hit in an A
//! leader and toward B on every hit in a B leader. Followers read PSEL on each
//! insertion: at or above its midpoint they apply A, below it they apply B.
//!
//! Leader membership is a pure function of the set index:
//! `set % stride == leader_a` or `set % stride == leader_b`.

use crate::common::SaturatingCounter;
use crate::config::DuelingConfig;

/// Role a set plays in the duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetRole {
    /// Always runs policy A; its hits vote for A.
    LeaderA,
    /// Always runs policy B; its hits vote for B.
    LeaderB,
    /// Runs whichever policy PSEL currently favours.
    Follower,
}

/// Leader assignment plus the shared policy selector.
#[derive(Clone, Debug)]
pub struct SetDueling {
    psel: SaturatingCounter,
    stride: usize,
    leader_a: usize,
    leader_b: usize,
}

impl SetDueling {
    /// Creates a selector with PSEL at `psel_max / 2`.
    ///
    /// # Panics
    ///
    /// Panics if `config.leader_stride` is zero.
    pub fn new(config: &DuelingConfig) -> Self {
        assert!(config.leader_stride > 0, "leader stride must be non-zero");
        let mut dueling = Self {
            psel: SaturatingCounter::new(config.psel_max),
            stride: config.leader_stride,
            leader_a: config.leader_a,
            leader_b: config.leader_b,
        };
        dueling.reset();
        dueling
    }

    /// Puts PSEL back at its initial position.
    pub fn reset(&mut self) {
        self.psel = SaturatingCounter::with_value(self.psel.max(), self.threshold());
    }

    /// `psel_max / 2`: followers run A at or above this value.
    #[inline(always)]
    fn threshold(&self) -> u16 {
        self.psel.max() / 2
    }

    /// Role of `set` in the duel.
    #[inline(always)]
    pub const fn role(&self, set: usize) -> SetRole {
        let slot = set % self.stride;
        if slot == self.leader_a {
            SetRole::LeaderA
        } else if slot == self.leader_b {
            SetRole::LeaderB
        } else {
            SetRole::Follower
        }
    }

    /// Counts a hit in `set`; only leader sets move PSEL.
    pub fn record_hit(&mut self, set: usize) {
        let before = self.prefers_a();
        match self.role(set) {
            SetRole::LeaderA => self.psel.increment(),
            SetRole::LeaderB => self.psel.decrement(),
            SetRole::Follower => return,
        }
        if before != self.prefers_a() {
            tracing::trace!(
                psel = self.psel.value(),
                winner = if self.prefers_a() { "A" } else { "B" },
                "set dueling winner changed"
            );
        }
    }

    /// Whether followers currently adopt policy A.
    #[inline(always)]
    pub fn prefers_a(&self) -> bool {
        self.psel.value() >= self.threshold()
    }

    /// Whether an insertion in `set` applies policy A.
    pub fn uses_policy_a(&self, set: usize) -> bool {
        match self.role(set) {
            SetRole::LeaderA => true,
            SetRole::LeaderB => false,
            SetRole::Follower => self.prefers_a(),
        }
    }

    /// Current PSEL value.
    #[inline(always)]
    pub const fn psel(&self) -> u16 {
        self.psel.value()
    }

    /// PSEL saturation bound.
    #[inline(always)]
    pub const fn psel_max(&self) -> u16 {
        self.psel.max()
    }
}
