//! Memory Access Types.
//!
//! This module defines the classification of requests the host cache reports to
//! the replacement engine. The distinction matters for two reasons:
//! 1. **Training:** Writebacks carry no PC locality and are ignored by Hawkeye.
//! 2. **Statistics:** Writebacks are counted separately from demand accesses.

/// Type of request that reached the last-level cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AccessType {
    /// Demand load.
    #[default]
    Load,

    /// Read-for-ownership (store miss in an upper level).
    Rfo,

    /// Hardware prefetch request.
    Prefetch,

    /// Dirty eviction from an upper-level cache.
    ///
    /// The PC attached to a writeback is not the PC that will reuse the line,
    /// so predictive policies must not train on it.
    Writeback,
}

impl AccessType {
    /// Returns `true` for writebacks.
    #[inline(always)]
    pub const fn is_writeback(self) -> bool {
        matches!(self, Self::Writeback)
    }
}
