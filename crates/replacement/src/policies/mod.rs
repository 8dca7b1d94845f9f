//! Cache Replacement Policies.
//!
//! Implements victim selection and insertion-priority assignment for a
//! set-associative last-level cache.
//!
//! # Policies
//!
//! - `Lru`: True LRU (recency stack per set).
//! - `Srrip`: Static re-reference interval prediction.
//! - `Drrip`: SRRIP vs BRRIP set dueling.
//! - `Dip`: LRU vs BIP set dueling.
//! - `Ship`: Signature-based hit prediction over RRIP.
//! - `Hawkeye`: OPTgen-trained PC predictor over RRIP.

/// Dynamic insertion policy (LRU vs BIP).
pub mod dip;

/// Dynamic RRIP (SRRIP vs BRRIP).
pub mod drrip;

/// Set-dueling selector shared by DRRIP and DIP.
pub mod dueling;

/// Hawkeye: OPTgen, sampled history, and PC predictor.
pub mod hawkeye;

/// Least Recently Used replacement policy.
pub mod lru;

/// RRIP per-line state and the static RRIP baseline.
pub mod rrip;

/// Signature-based hit predictor.
pub mod ship;

pub use dip::DipPolicy;
pub use drrip::DrripPolicy;
pub use dueling::{SetDueling, SetRole};
pub use hawkeye::HawkeyePolicy;
pub use lru::{LruPolicy, LruStack};
pub use rrip::{RripState, SrripPolicy};
pub use ship::ShipPolicy;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::common::{AccessType, ConfigError};
use crate::config::{Config, PolicyKind};
use crate::stats::PolicyStats;

/// Trait for cache replacement policies.
///
/// The host calls [`get_victim`](Self::get_victim) when a fill needs a way in
/// a full set, then [`update`](Self::update) for that fill. Hits call only
/// `update`. Calls for one access are serialized by the host.
pub trait ReplacementPolicy: Send + Sync {
    /// Resets every owned table to its initial state.
    fn init(&mut self);

    /// Selects a victim line to evict from a specific set.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    ///
    /// # Returns
    ///
    /// The index of the way to evict; always `< ways`.
    fn get_victim(&mut self, set: usize) -> usize;

    /// Updates the policy state after a hit or a fill.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    /// * `way` - The way that hit or was filled.
    /// * `pc` - Program counter of the requesting instruction.
    /// * `address` - Physical address of the request.
    /// * `kind` - Request type.
    /// * `hit` - Whether the request hit.
    fn update(
        &mut self,
        set: usize,
        way: usize,
        pc: u64,
        address: u64,
        kind: AccessType,
        hit: bool,
    );

    /// Snapshot of the policy's observable counters.
    fn stats(&self) -> PolicyStats;

    /// Periodic report; logs the snapshot and returns it.
    fn heartbeat_stats(&self) -> PolicyStats {
        let stats = self.stats();
        tracing::info!(
            policy = stats.policy,
            accesses = stats.accesses,
            hit_rate = stats.hit_rate(),
            psel = stats.psel,
            opt_hit_rate = stats.opt_hit_rate(),
            "heartbeat"
        );
        stats
    }

    /// End-of-run report; logs the snapshot and returns it.
    fn final_stats(&self) -> PolicyStats {
        let stats = self.stats();
        tracing::info!(
            policy = stats.policy,
            accesses = stats.accesses,
            hits = stats.hits,
            hit_rate = stats.hit_rate(),
            psel = stats.psel,
            opt_hits = stats.opt_hits,
            opt_accesses = stats.opt_accesses,
            opt_hit_rate = stats.opt_hit_rate(),
            "final statistics"
        );
        stats
    }
}

/// Enum wrapper for static dispatch of replacement policies.
/// This avoids vtable lookups on the per-access path.
#[derive(Debug)]
pub enum Engine {
    /// True LRU.
    Lru(LruPolicy),
    /// Static RRIP.
    Srrip(SrripPolicy),
    /// Dynamic RRIP.
    Drrip(DrripPolicy<ChaCha8Rng>),
    /// Dynamic insertion policy.
    Dip(DipPolicy<ChaCha8Rng>),
    /// Signature-based hit predictor.
    Ship(ShipPolicy),
    /// OPTgen-trained predictor.
    Hawkeye(HawkeyePolicy),
}

impl Engine {
    /// Builds the policy selected by `config`.
    ///
    /// Dueling policies draw their rare insertions from a `ChaCha8Rng` seeded
    /// from configuration, so runs are reproducible.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Config::validate`].
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let geometry = config.geometry;
        tracing::debug!(
            policy = config.policy.name(),
            sets = geometry.sets,
            ways = geometry.ways,
            "initializing replacement engine"
        );

        let engine = match config.policy {
            PolicyKind::Lru => Self::Lru(LruPolicy::new(geometry.sets, geometry.ways)),
            PolicyKind::Srrip => Self::Srrip(SrripPolicy::new(geometry, &config.rrip)),
            PolicyKind::Drrip => Self::Drrip(DrripPolicy::with_rng(
                geometry,
                &config.rrip,
                &config.drrip,
                ChaCha8Rng::seed_from_u64(config.drrip.seed),
            )),
            PolicyKind::Dip => Self::Dip(DipPolicy::with_rng(
                geometry,
                &config.dip,
                ChaCha8Rng::seed_from_u64(config.dip.seed),
            )),
            PolicyKind::Ship => Self::Ship(ShipPolicy::new(geometry, &config.ship)),
            PolicyKind::Hawkeye => Self::Hawkeye(HawkeyePolicy::new(geometry, &config.hawkeye)),
        };
        Ok(engine)
    }

    /// The policy this engine runs.
    pub const fn kind(&self) -> PolicyKind {
        match self {
            Self::Lru(_) => PolicyKind::Lru,
            Self::Srrip(_) => PolicyKind::Srrip,
            Self::Drrip(_) => PolicyKind::Drrip,
            Self::Dip(_) => PolicyKind::Dip,
            Self::Ship(_) => PolicyKind::Ship,
            Self::Hawkeye(_) => PolicyKind::Hawkeye,
        }
    }
}

impl ReplacementPolicy for Engine {
    #[inline(always)]
    fn init(&mut self) {
        match self {
            Self::Lru(p) => p.init(),
            Self::Srrip(p) => p.init(),
            Self::Drrip(p) => p.init(),
            Self::Dip(p) => p.init(),
            Self::Ship(p) => p.init(),
            Self::Hawkeye(p) => p.init(),
        }
    }

    #[inline(always)]
    fn get_victim(&mut self, set: usize) -> usize {
        match self {
            Self::Lru(p) => p.get_victim(set),
            Self::Srrip(p) => p.get_victim(set),
            Self::Drrip(p) => p.get_victim(set),
            Self::Dip(p) => p.get_victim(set),
            Self::Ship(p) => p.get_victim(set),
            Self::Hawkeye(p) => p.get_victim(set),
        }
    }

    #[inline(always)]
    fn update(
        &mut self,
        set: usize,
        way: usize,
        pc: u64,
        address: u64,
        kind: AccessType,
        hit: bool,
    ) {
        match self {
            Self::Lru(p) => p.update(set, way, pc, address, kind, hit),
            Self::Srrip(p) => p.update(set, way, pc, address, kind, hit),
            Self::Drrip(p) => p.update(set, way, pc, address, kind, hit),
            Self::Dip(p) => p.update(set, way, pc, address, kind, hit),
            Self::Ship(p) => p.update(set, way, pc, address, kind, hit),
            Self::Hawkeye(p) => p.update(set, way, pc, address, kind, hit),
        }
    }

    fn stats(&self) -> PolicyStats {
        match self {
            Self::Lru(p) => p.stats(),
            Self::Srrip(p) => p.stats(),
            Self::Drrip(p) => p.stats(),
            Self::Dip(p) => p.stats(),
            Self::Ship(p) => p.stats(),
            Self::Hawkeye(p) => p.stats(),
        }
    }
}
