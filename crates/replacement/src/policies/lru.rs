//! Least Recently Used (LRU) Replacement.
//!
//! Each set keeps its ways ordered by recency. A hit or fill moves the way to
//! the front (MRU); the way at the back (LRU) is the victim. Nothing else is
//! learned, so a cyclic footprint one block larger than the set misses on
//! every access.
//!
//! [`LruStack`] is also the recency store behind DIP, which additionally
//! inserts lines directly at the LRU position.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(W), W ways
//!   - `get_victim()`: O(1)
//! - **Space Complexity:** O(S × W) way indices

use super::ReplacementPolicy;
use crate::common::AccessType;
use crate::config::PolicyKind;
use crate::stats::{AccessCounters, PolicyStats};

/// Per-set usage stacks.
#[derive(Clone, Debug)]
pub struct LruStack {
    /// Way order per set, MRU first.
    usage: Vec<Vec<usize>>,
    /// Number of ways in the cache.
    ways: usize,
}

impl LruStack {
    /// Creates `sets` stacks ordered `0..ways`: way 0 at MRU, the last way at LRU.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            usage: (0..sets).map(|_| (0..ways).collect()).collect(),
            ways,
        }
    }

    /// Restores the initial stack order in every set.
    pub fn reset(&mut self) {
        for stack in &mut self.usage {
            stack.clear();
            stack.extend(0..self.ways);
        }
    }

    /// Recency rank of `way` (0 = MRU, `ways - 1` = LRU).
    pub fn rank(&self, set: usize, way: usize) -> usize {
        let rank = self.position(set, way);
        debug_assert!(rank.is_some(), "way {way} missing from LRU stack of set {set}");
        rank.unwrap_or_else(|| {
            tracing::error!(set, way, "way missing from LRU stack");
            self.ways - 1
        })
    }

    fn position(&self, set: usize, way: usize) -> Option<usize> {
        self.usage[set].iter().position(|&held| held == way)
    }

    /// Ranks of every way in `set`, indexed by way.
    pub fn ranks(&self, set: usize) -> Vec<usize> {
        let mut ranks = vec![0; self.ways];
        for (rank, &way) in self.usage[set].iter().enumerate() {
            ranks[way] = rank;
        }
        ranks
    }

    /// The way at the LRU position.
    pub fn victim(&self, set: usize) -> usize {
        let victim = self.usage[set].last().copied();
        debug_assert!(victim.is_some(), "empty LRU stack in set {set}");
        victim.unwrap_or(0)
    }

    /// Moves `way` to the MRU position, shifting more recent ways down.
    pub fn promote(&mut self, set: usize, way: usize) {
        if let Some(pos) = self.held_position(set, way) {
            let stack = &mut self.usage[set];
            let _ = stack.remove(pos);
            stack.insert(0, way);
        }
    }

    /// Moves `way` to the LRU position, shifting less recent ways up.
    pub fn demote(&mut self, set: usize, way: usize) {
        if let Some(pos) = self.held_position(set, way) {
            let stack = &mut self.usage[set];
            let _ = stack.remove(pos);
            stack.push(way);
        }
    }

    /// Stack position of `way`; a way outside the stack is reported and
    /// left out so the stack stays a permutation of `0..ways`.
    fn held_position(&self, set: usize, way: usize) -> Option<usize> {
        let pos = self.position(set, way);
        debug_assert!(pos.is_some(), "way {way} out of range for {} ways", self.ways);
        if pos.is_none() {
            tracing::error!(set, way, ways = self.ways, "way outside LRU stack");
        }
        pos
    }
}

/// Plain LRU over [`LruStack`].
#[derive(Clone, Debug)]
pub struct LruPolicy {
    /// Usage stacks.
    stack: LruStack,
    /// Hit/access bookkeeping.
    counters: AccessCounters,
}

impl LruPolicy {
    /// Creates an LRU policy for a `sets × ways` cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            stack: LruStack::new(sets, ways),
            counters: AccessCounters::default(),
        }
    }

    /// Read access to the usage stacks.
    pub const fn stack(&self) -> &LruStack {
        &self.stack
    }
}

impl ReplacementPolicy for LruPolicy {
    fn init(&mut self) {
        self.stack.reset();
        self.counters.reset();
    }

    /// The way at the LRU position.
    fn get_victim(&mut self, set: usize) -> usize {
        self.stack.victim(set)
    }

    /// Moves the accessed `way` to the front of the usage stack (MRU position).
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
        self.stack.promote(set, way);
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats::new(PolicyKind::Lru.name(), self.counters)
    }
}
