//! Configuration Errors.
//!
//! The replacement path itself cannot fail: every index is reduced against a
//! table size fixed at construction. The only fallible step is building an
//! engine from a configuration, which is rejected up front when the geometry
//! or a table parameter would make an index computation meaningless.

use thiserror::Error;

/// Errors reported while validating a [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The cache has no sets.
    #[error("cache geometry must have at least one set")]
    ZeroSets,

    /// The cache has no ways.
    #[error("cache geometry must have at least one way")]
    ZeroWays,

    /// The policy needs more associativity than the geometry provides.
    #[error("{policy} requires at least {required} ways, got {ways}")]
    InsufficientWays {
        /// Policy name.
        policy: &'static str,
        /// Configured associativity.
        ways: usize,
        /// Minimum associativity.
        required: usize,
    },

    /// A masked table was given a size that is not a power of two.
    #[error("{table} size must be a power of two, got {size}")]
    NotPowerOfTwo {
        /// Table name.
        table: &'static str,
        /// Offending size.
        size: usize,
    },

    /// A table or counter bound is zero.
    #[error("{table} must be non-zero")]
    ZeroTable {
        /// Table or field name.
        table: &'static str,
    },

    /// The maximum RRPV leaves no room for a "long" insertion depth.
    #[error("rrpv_max must be at least 1, got {value}")]
    InvalidRrpvMax {
        /// Offending value.
        value: u8,
    },

    /// Leader-set assignment would overlap or never match.
    #[error("invalid leader sets: stride {stride}, leader A offset {leader_a}, leader B offset {leader_b}")]
    InvalidLeaderSets {
        /// Set-index stride.
        stride: usize,
        /// Offset selecting policy-A leaders.
        leader_a: usize,
        /// Offset selecting policy-B leaders.
        leader_b: usize,
    },

    /// OPT window and timer sizes are inconsistent.
    #[error("OPT window {window} must be non-zero and divide a strictly larger timer size {timer_size}")]
    InvalidWindow {
        /// Window length in quanta.
        window: usize,
        /// Per-set timer modulus.
        timer_size: u64,
    },

    /// Line offset shift does not fit a 64-bit address.
    #[error("line_shift must be below 64, got {shift}")]
    InvalidLineShift {
        /// Offending shift.
        shift: u32,
    },

    /// JSON configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}
