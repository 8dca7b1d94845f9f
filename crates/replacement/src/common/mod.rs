//! Common utilities and types shared by every replacement policy.
//!
//! This module provides the fundamental building blocks of the engine:
//! 1. **Access Types:** Classification of host requests (loads, RFOs, prefetches, writebacks).
//! 2. **Hashing:** The CRC-style mix used for PC and address-tag hashing, and the SHiP fold.
//! 3. **Counters:** Saturating counters used by predictors and policy selectors.
//! 4. **Error Handling:** Configuration errors reported at construction time.

/// Memory access type definitions.
pub mod access;

/// Saturating counter primitive.
pub mod counter;

/// Configuration error types.
pub mod error;

/// Deterministic hash utilities.
pub mod hash;

pub use access::AccessType;
pub use counter::SaturatingCounter;
pub use error::ConfigError;
