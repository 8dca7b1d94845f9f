//! # Configuration Tests
//!
//! Tests for configuration defaults, JSON deserialization, and validation.

use llc_replacement::common::ConfigError;
use llc_replacement::config::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.policy, PolicyKind::Hawkeye);
    assert_eq!(config.geometry, Geometry::new(2048, 16));
    assert_eq!(config.geometry.lines(), 32768);
    assert_eq!(config.rrip.rrpv_max, 3);
    assert!(config.validate().is_ok());
}

#[test]
fn test_dueling_layouts() {
    let drrip = DuelingConfig::drrip();
    assert_eq!(drrip.psel_max, 1023);
    assert_eq!(drrip.leader_stride, 16);
    assert_eq!((drrip.leader_a, drrip.leader_b), (0, 1));
    assert_eq!(drrip.rare_insertion_odds, 32);

    let dip = DuelingConfig::dip();
    assert_eq!(dip.leader_stride, 64);
    assert_eq!((dip.leader_a, dip.leader_b), (1, 2));
    assert_eq!(DuelingConfig::default(), drrip);
}

#[test]
fn test_ship_defaults() {
    let ship = ShipConfig::default();
    assert_eq!(ship.rrpv_max, 3);
    assert_eq!(ship.table_size, 2048);
    assert_eq!(ship.counter_max, 511);
}

#[test]
fn test_hawkeye_defaults() {
    let hawkeye = HawkeyeConfig::default();
    assert_eq!(hawkeye.rrpv_max, 7);
    assert_eq!(hawkeye.predictor_size, 2048);
    assert_eq!(hawkeye.predictor_max, 31);
    assert_eq!(hawkeye.window, 128);
    assert_eq!(hawkeye.timer_size, 1024);
    assert_eq!(hawkeye.line_shift, 6);
}

#[rstest]
#[case(PolicyKind::Lru, "LRU")]
#[case(PolicyKind::Srrip, "SRRIP")]
#[case(PolicyKind::Drrip, "DRRIP")]
#[case(PolicyKind::Dip, "DIP")]
#[case(PolicyKind::Ship, "SHiP")]
#[case(PolicyKind::Hawkeye, "Hawkeye")]
fn test_policy_names(#[case] kind: PolicyKind, #[case] name: &str) {
    assert_eq!(kind.name(), name);
}

// ══════════════════════════════════════════════════════════
// 2. Deserialization
// ══════════════════════════════════════════════════════════

#[test]
fn test_empty_json_is_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.geometry, Geometry::default());
    assert_eq!(config.drrip, DuelingConfig::drrip());
    assert_eq!(config.dip, DuelingConfig::dip());
    assert_eq!(config.hawkeye, HawkeyeConfig::default());
}

#[test]
fn test_partial_sections_keep_field_defaults() {
    let json = r#"{
        "geometry": { "ways": 8 },
        "policy": "Ship",
        "ship": { "counter_max": 3 },
        "hawkeye": { "window": 8, "timer_size": 64 }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.geometry, Geometry::new(2048, 8));
    assert_eq!(config.policy, PolicyKind::Ship);
    assert_eq!(config.ship.counter_max, 3);
    assert_eq!(config.ship.table_size, 2048);
    assert_eq!(config.hawkeye.window, 8);
    assert_eq!(config.hawkeye.predictor_max, 31);
}

#[rstest]
#[case("\"Lru\"", PolicyKind::Lru)]
#[case("\"LRU\"", PolicyKind::Lru)]
#[case("\"SRRIP\"", PolicyKind::Srrip)]
#[case("\"Drrip\"", PolicyKind::Drrip)]
#[case("\"DIP\"", PolicyKind::Dip)]
#[case("\"SHiP\"", PolicyKind::Ship)]
#[case("\"HAWKEYE\"", PolicyKind::Hawkeye)]
fn test_policy_aliases(#[case] name: &str, #[case] expected: PolicyKind) {
    let json = format!(r#"{{ "policy": {name} }}"#);
    assert_eq!(Config::from_json(&json).unwrap().policy, expected);
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        Config::from_json("{ \"geometry\": "),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn test_unknown_policy_is_rejected() {
    assert!(matches!(
        Config::from_json(r#"{ "policy": "Random" }"#),
        Err(ConfigError::Json(_))
    ));
}

// ══════════════════════════════════════════════════════════
// 3. Validation
// ══════════════════════════════════════════════════════════

#[test]
fn test_zero_geometry() {
    let mut config = Config::default();
    config.geometry.sets = 0;
    assert!(matches!(config.validate(), Err(ConfigError::ZeroSets)));

    config.geometry = Geometry::new(16, 0);
    assert!(matches!(config.validate(), Err(ConfigError::ZeroWays)));
}

#[test]
fn test_hawkeye_needs_three_ways() {
    let mut config = Config::default();
    config.geometry = Geometry::new(16, 2);
    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InsufficientWays {
            ways: 2,
            required: HAWKEYE_MIN_WAYS,
            ..
        }
    ));
    assert_eq!(err.to_string(), "Hawkeye requires at least 3 ways, got 2");

    config.policy = PolicyKind::Lru;
    assert!(config.validate().is_ok());
}

#[test]
fn test_ship_table_must_be_power_of_two() {
    let mut config = Config::default();
    config.ship.table_size = 1000;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotPowerOfTwo { size: 1000, .. })
    ));
}

#[test]
fn test_rrpv_max_must_be_positive() {
    let mut config = Config::default();
    config.rrip.rrpv_max = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidRrpvMax { value: 0 })
    ));
}

#[rstest]
#[case(16, 0, 0)]
#[case(16, 0, 16)]
#[case(1, 0, 1)]
fn test_invalid_leader_sets(#[case] stride: usize, #[case] a: usize, #[case] b: usize) {
    let mut config = Config::default();
    config.drrip.leader_stride = stride;
    config.drrip.leader_a = a;
    config.drrip.leader_b = b;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidLeaderSets { .. })
    ));
}

#[test]
fn test_zero_psel_and_odds() {
    let mut config = Config::default();
    config.dip.psel_max = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroTable { table: "psel_max" })
    ));

    let mut config = Config::default();
    config.drrip.rare_insertion_odds = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroTable { .. })
    ));
}

#[rstest]
#[case(0, 1024)]
#[case(128, 128)]
#[case(128, 1000)]
fn test_invalid_window(#[case] window: usize, #[case] timer_size: u64) {
    let mut config = Config::default();
    config.hawkeye.window = window;
    config.hawkeye.timer_size = timer_size;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidWindow { .. })
    ));
}

#[test]
fn test_invalid_line_shift() {
    let mut config = Config::default();
    config.hawkeye.line_shift = 64;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidLineShift { shift: 64 })
    ));
}

#[test]
fn test_zero_predictor_table() {
    let mut config = Config::default();
    config.hawkeye.predictor_size = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroTable { .. })
    ));
}
