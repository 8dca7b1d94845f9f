//! # Unit Components
//!
//! Organizes the engine's component tests: shared primitives, configuration,
//! statistics, each replacement policy, and the dispatching `Engine`.


/// Unit tests for configuration defaults, deserialization, and validation.
pub mod config;



/// Unit tests for statistics snapshots and reports.
pub mod stats;
