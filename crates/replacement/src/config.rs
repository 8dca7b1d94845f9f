//! Configuration system for the replacement engine.
//!
//! This module defines all configuration structures used to parameterize the
//! engine. It provides:
//! 1. **Defaults:** Baseline constants for a 2048-set, 16-way last-level cache.
//! 2. **Structures:** Geometry, policy selection, and per-policy table sizes.
//! 3. **Validation:** Rejection of geometries and table sizes that would make an
//!    index computation meaningless.
//!
//! Configuration is supplied as JSON by the host (`Config::from_json`) or built
//! in code starting from `Config::default()`.

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the engine.
///
/// These reproduce the parameters the policies were tuned with.
mod defaults {
    /// Number of LLC sets (one core, 2 MiB, 16-way, 64-byte lines).
    pub const SETS: usize = 2048;

    /// LLC associativity.
    pub const WAYS: usize = 16;

    /// Maximum RRPV for the 2-bit RRIP family (SRRIP, DRRIP, SHiP).
    pub const RRPV_MAX: u8 = 3;

    /// Maximum value of the 10-bit policy selector.
    pub const PSEL_MAX: u16 = 1023;

    /// DRRIP leader sets: `set % 16 == 0` run SRRIP, `set % 16 == 1` run BRRIP.
    pub const DRRIP_LEADER_STRIDE: usize = 16;
    /// Offset of SRRIP leader sets.
    pub const DRRIP_LEADER_A: usize = 0;
    /// Offset of BRRIP leader sets.
    pub const DRRIP_LEADER_B: usize = 1;

    /// DIP leader sets: 32 per policy out of 2048 sets.
    pub const DIP_LEADER_STRIDE: usize = 64;
    /// Offset of LRU leader sets.
    pub const DIP_LEADER_A: usize = 1;
    /// Offset of BIP leader sets.
    pub const DIP_LEADER_B: usize = 2;

    /// One in 32 insertions takes the rare branch of BRRIP / BIP.
    pub const RARE_INSERTION_ODDS: u32 = 32;

    /// Seed of the insertion RNG.
    pub const SEED: u64 = 0;

    /// SHiP signature history counter table entries.
    pub const SHCT_SIZE: usize = 2048;
    /// SHiP counter maximum (9-bit).
    pub const SHCT_MAX: u16 = 511;

    /// Hawkeye uses 3-bit RRPVs.
    pub const HAWKEYE_RRPV_MAX: u8 = 7;
    /// Hawkeye PC predictor entries.
    pub const PREDICTOR_SIZE: usize = 2048;
    /// Hawkeye PC predictor counter maximum (5-bit).
    pub const PREDICTOR_MAX: u16 = 31;
    /// OPTgen occupancy vector length in quanta.
    pub const OPT_WINDOW: usize = 128;
    /// Per-set timer modulus.
    pub const TIMER_SIZE: u64 = 1024;
    /// log2 of the cache line size.
    pub const LINE_SHIFT: u32 = 6;
}

/// Associativity Hawkeye needs: OPTgen models a capacity of `ways - 2`.
pub const HAWKEYE_MIN_WAYS: usize = 3;

/// Replacement policy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PolicyKind {
    /// True LRU.
    #[serde(alias = "LRU")]
    Lru,
    /// Static RRIP: insert at `rrpv_max - 1`.
    #[serde(alias = "SRRIP")]
    Srrip,
    /// Dynamic RRIP: SRRIP vs BRRIP set dueling.
    #[serde(alias = "DRRIP")]
    Drrip,
    /// Dynamic insertion: LRU vs BIP set dueling.
    #[serde(alias = "DIP")]
    Dip,
    /// Signature-based hit predictor.
    #[serde(alias = "SHiP", alias = "SHIP")]
    Ship,
    /// OPTgen-trained PC predictor.
    #[default]
    #[serde(alias = "HAWKEYE")]
    Hawkeye,
}

impl PolicyKind {
    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lru => "LRU",
            Self::Srrip => "SRRIP",
            Self::Drrip => "DRRIP",
            Self::Dip => "DIP",
            Self::Ship => "SHiP",
            Self::Hawkeye => "Hawkeye",
        }
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use llc_replacement::config::{Config, PolicyKind};
///
/// let config = Config::default();
/// assert_eq!(config.policy, PolicyKind::Hawkeye);
/// assert_eq!(config.geometry.sets, 2048);
///
/// let json = r#"{
///     "geometry": { "sets": 64, "ways": 8 },
///     "policy": "Drrip",
///     "drrip": { "psel_max": 63, "seed": 7 }
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.policy, PolicyKind::Drrip);
/// assert_eq!(config.drrip.psel_max, 63);
/// assert_eq!(config.drrip.leader_stride, 16);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Cache geometry
    #[serde(default)]
    pub geometry: Geometry,

    /// Selected policy
    #[serde(default)]
    pub policy: PolicyKind,

    /// SRRIP parameters (also used by DRRIP)
    #[serde(default)]
    pub rrip: RripConfig,

    /// DRRIP set dueling
    #[serde(default = "DuelingConfig::drrip")]
    pub drrip: DuelingConfig,

    /// DIP set dueling
    #[serde(default = "DuelingConfig::dip")]
    pub dip: DuelingConfig,

    /// SHiP tables
    #[serde(default)]
    pub ship: ShipConfig,

    /// Hawkeye tables
    #[serde(default)]
    pub hawkeye: HawkeyeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            policy: PolicyKind::default(),
            rrip: RripConfig::default(),
            drrip: DuelingConfig::drrip(),
            dip: DuelingConfig::dip(),
            ship: ShipConfig::default(),
            hawkeye: HawkeyeConfig::default(),
        }
    }
}

impl Config {
    /// Parses a JSON document and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input and any validation
    /// error from [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every section against the geometry.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry.validate()?;
        self.rrip.validate()?;
        self.drrip.validate()?;
        self.dip.validate()?;
        self.ship.validate()?;
        self.hawkeye.validate()?;

        if self.policy == PolicyKind::Hawkeye && self.geometry.ways < HAWKEYE_MIN_WAYS {
            return Err(ConfigError::InsufficientWays {
                policy: PolicyKind::Hawkeye.name(),
                ways: self.geometry.ways,
                required: HAWKEYE_MIN_WAYS,
            });
        }
        Ok(())
    }
}

/// Cache geometry owned by the host; fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Geometry {
    /// Number of sets
    #[serde(default = "Geometry::default_sets")]
    pub sets: usize,

    /// Associativity (number of ways)
    #[serde(default = "Geometry::default_ways")]
    pub ways: usize,
}

impl Geometry {
    /// Creates a geometry.
    pub const fn new(sets: usize, ways: usize) -> Self {
        Self { sets, ways }
    }

    /// Total number of cache lines.
    pub const fn lines(&self) -> usize {
        self.sets * self.ways
    }

    fn default_sets() -> usize {
        defaults::SETS
    }

    fn default_ways() -> usize {
        defaults::WAYS
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sets == 0 {
            return Err(ConfigError::ZeroSets);
        }
        if self.ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        Ok(())
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            sets: defaults::SETS,
            ways: defaults::WAYS,
        }
    }
}

/// Static RRIP parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RripConfig {
    /// Distant re-reference value; SRRIP inserts at `rrpv_max - 1`
    #[serde(default = "RripConfig::default_rrpv_max")]
    pub rrpv_max: u8,
}

impl RripConfig {
    fn default_rrpv_max() -> u8 {
        defaults::RRPV_MAX
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_rrpv_max(self.rrpv_max)
    }
}

impl Default for RripConfig {
    fn default() -> Self {
        Self {
            rrpv_max: defaults::RRPV_MAX,
        }
    }
}

/// Set-dueling parameters shared by DRRIP and DIP.
///
/// A set is a leader for policy A when `set % leader_stride == leader_a`, a
/// leader for policy B when `set % leader_stride == leader_b`, and a follower
/// otherwise. Field defaults are the DRRIP layout; the `dip` section as a whole
/// defaults to the DIP layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DuelingConfig {
    /// Policy selector saturation bound
    #[serde(default = "DuelingConfig::default_psel_max")]
    pub psel_max: u16,

    /// Set-index stride of the leader pattern
    #[serde(default = "DuelingConfig::default_leader_stride")]
    pub leader_stride: usize,

    /// Offset selecting policy-A leader sets
    #[serde(default = "DuelingConfig::default_leader_a")]
    pub leader_a: usize,

    /// Offset selecting policy-B leader sets
    #[serde(default = "DuelingConfig::default_leader_b")]
    pub leader_b: usize,

    /// The rare insertion branch is taken once in this many draws
    #[serde(default = "DuelingConfig::default_rare_odds")]
    pub rare_insertion_odds: u32,

    /// Seed for the insertion RNG
    #[serde(default = "DuelingConfig::default_seed")]
    pub seed: u64,
}

impl DuelingConfig {
    /// DRRIP layout: SRRIP leaders at `set % 16 == 0`, BRRIP at `== 1`.
    pub const fn drrip() -> Self {
        Self {
            psel_max: defaults::PSEL_MAX,
            leader_stride: defaults::DRRIP_LEADER_STRIDE,
            leader_a: defaults::DRRIP_LEADER_A,
            leader_b: defaults::DRRIP_LEADER_B,
            rare_insertion_odds: defaults::RARE_INSERTION_ODDS,
            seed: defaults::SEED,
        }
    }

    /// DIP layout: LRU leaders at `set % 64 == 1`, BIP at `== 2`.
    pub const fn dip() -> Self {
        Self {
            psel_max: defaults::PSEL_MAX,
            leader_stride: defaults::DIP_LEADER_STRIDE,
            leader_a: defaults::DIP_LEADER_A,
            leader_b: defaults::DIP_LEADER_B,
            rare_insertion_odds: defaults::RARE_INSERTION_ODDS,
            seed: defaults::SEED,
        }
    }

    fn default_psel_max() -> u16 {
        defaults::PSEL_MAX
    }

    fn default_leader_stride() -> usize {
        defaults::DRRIP_LEADER_STRIDE
    }

    fn default_leader_a() -> usize {
        defaults::DRRIP_LEADER_A
    }

    fn default_leader_b() -> usize {
        defaults::DRRIP_LEADER_B
    }

    fn default_rare_odds() -> u32 {
        defaults::RARE_INSERTION_ODDS
    }

    fn default_seed() -> u64 {
        defaults::SEED
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.psel_max == 0 {
            return Err(ConfigError::ZeroTable { table: "psel_max" });
        }
        if self.rare_insertion_odds == 0 {
            return Err(ConfigError::ZeroTable {
                table: "rare_insertion_odds",
            });
        }
        if self.leader_stride < 2
            || self.leader_a == self.leader_b
            || self.leader_a >= self.leader_stride
            || self.leader_b >= self.leader_stride
        {
            return Err(ConfigError::InvalidLeaderSets {
                stride: self.leader_stride,
                leader_a: self.leader_a,
                leader_b: self.leader_b,
            });
        }
        Ok(())
    }
}

impl Default for DuelingConfig {
    fn default() -> Self {
        Self::drrip()
    }
}

/// SHiP parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ShipConfig {
    /// Distant re-reference value
    #[serde(default = "ShipConfig::default_rrpv_max")]
    pub rrpv_max: u8,

    /// Signature history counter table entries (power of two)
    #[serde(default = "ShipConfig::default_table_size")]
    pub table_size: usize,

    /// SHCT counter saturation bound
    #[serde(default = "ShipConfig::default_counter_max")]
    pub counter_max: u16,
}

impl ShipConfig {
    fn default_rrpv_max() -> u8 {
        defaults::RRPV_MAX
    }

    fn default_table_size() -> usize {
        defaults::SHCT_SIZE
    }

    fn default_counter_max() -> u16 {
        defaults::SHCT_MAX
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_rrpv_max(self.rrpv_max)?;
        if !self.table_size.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                table: "SHCT",
                size: self.table_size,
            });
        }
        if self.counter_max == 0 {
            return Err(ConfigError::ZeroTable {
                table: "SHCT counter_max",
            });
        }
        Ok(())
    }
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            rrpv_max: defaults::RRPV_MAX,
            table_size: defaults::SHCT_SIZE,
            counter_max: defaults::SHCT_MAX,
        }
    }
}

/// Hawkeye parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HawkeyeConfig {
    /// Distant re-reference value (3-bit RRPVs by default)
    #[serde(default = "HawkeyeConfig::default_rrpv_max")]
    pub rrpv_max: u8,

    /// PC predictor entries
    #[serde(default = "HawkeyeConfig::default_predictor_size")]
    pub predictor_size: usize,

    /// PC predictor counter saturation bound
    #[serde(default = "HawkeyeConfig::default_predictor_max")]
    pub predictor_max: u16,

    /// OPTgen window length in quanta
    #[serde(default = "HawkeyeConfig::default_window")]
    pub window: usize,

    /// Per-set timer modulus (multiple of `window`)
    #[serde(default = "HawkeyeConfig::default_timer_size")]
    pub timer_size: u64,

    /// log2 of the line size; addresses are reduced to block addresses
    #[serde(default = "HawkeyeConfig::default_line_shift")]
    pub line_shift: u32,
}

impl HawkeyeConfig {
    fn default_rrpv_max() -> u8 {
        defaults::HAWKEYE_RRPV_MAX
    }

    fn default_predictor_size() -> usize {
        defaults::PREDICTOR_SIZE
    }

    fn default_predictor_max() -> u16 {
        defaults::PREDICTOR_MAX
    }

    fn default_window() -> usize {
        defaults::OPT_WINDOW
    }

    fn default_timer_size() -> u64 {
        defaults::TIMER_SIZE
    }

    fn default_line_shift() -> u32 {
        defaults::LINE_SHIFT
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_rrpv_max(self.rrpv_max)?;
        if self.predictor_size == 0 {
            return Err(ConfigError::ZeroTable {
                table: "predictor_size",
            });
        }
        if self.predictor_max == 0 {
            return Err(ConfigError::ZeroTable {
                table: "predictor_max",
            });
        }
        let window = self.window as u64;
        if window == 0 || self.timer_size <= window || self.timer_size % window != 0 {
            return Err(ConfigError::InvalidWindow {
                window: self.window,
                timer_size: self.timer_size,
            });
        }
        if self.line_shift >= u64::BITS {
            return Err(ConfigError::InvalidLineShift {
                shift: self.line_shift,
            });
        }
        Ok(())
    }
}

impl Default for HawkeyeConfig {
    fn default() -> Self {
        Self {
            rrpv_max: defaults::HAWKEYE_RRPV_MAX,
            predictor_size: defaults::PREDICTOR_SIZE,
            predictor_max: defaults::PREDICTOR_MAX,
            window: defaults::OPT_WINDOW,
            timer_size: defaults::TIMER_SIZE,
            line_shift: defaults::LINE_SHIFT,
        }
    }
}

fn validate_rrpv_max(value: u8) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidRrpvMax { value });
    }
    Ok(())
}
