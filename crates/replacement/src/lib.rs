//! Last-level cache replacement engines.
//!
//! This crate implements the victim-selection and insertion-priority logic of a
//! large set-associative last-level cache. It provides:
//! 1. **Hawkeye:** An online approximation of Belady's OPT (OPTgen) feeding a
//!    PC-indexed reuse predictor that drives RRIP insertion depths.
//! 2. **SHiP:** A PC-signature reuse predictor as an alternative to Hawkeye.
//! 3. **Set dueling:** DRRIP (SRRIP vs BRRIP) and DIP (LRU vs BIP) arbitrated by
//!    a shared saturating policy selector.
//! 4. **Baselines:** Plain SRRIP and LRU.
//!
//! Every policy implements [`ReplacementPolicy`]: the host cache calls
//! `get_victim` when a set is full and `update` after every hit or fill.

/// Shared building blocks (access types, hashing, saturating counters, errors).
pub mod common;
/// Engine configuration (geometry, policy selection, per-policy tables).
pub mod config;
/// Replacement policy implementations and the `Engine` dispatch type.
pub mod policies;
/// Observational counters and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Configured replacement engine; construct with `Engine::new`.
pub use crate::policies::Engine;
/// The host-facing contract every policy implements.
pub use crate::policies::ReplacementPolicy;
