//! Statistics Tests.
//!
//! Verifies the derived rates, the JSON shape, and the text report.

use llc_replacement::stats::{AccessCounters, PolicyStats};
use pretty_assertions::assert_eq;

fn counts(accesses: u64, hits: u64, writebacks: u64) -> AccessCounters {
    AccessCounters {
        accesses,
        hits,
        writebacks,
    }
}

#[test]
fn record_separates_writebacks() {
    let mut counters = AccessCounters::default();
    counters.record(false, true);
    counters.record(false, false);
    counters.record(true, true);
    assert_eq!(counters, counts(2, 1, 1));

    counters.reset();
    assert_eq!(counters, AccessCounters::default());
}

#[test]
fn hit_rate_guards_empty_run() {
    let stats = PolicyStats::new("LRU", AccessCounters::default());
    assert_eq!(stats.hit_rate(), 0.0);
    assert_eq!(stats.opt_hit_rate(), None);
}

#[test]
fn hit_rate_is_percent() {
    let stats = PolicyStats::new("LRU", counts(200, 50, 7));
    assert!((stats.hit_rate() - 25.0).abs() < f64::EPSILON);
}

#[test]
fn opt_hit_rate_needs_both_counters() {
    let stats = PolicyStats {
        opt_hits: Some(30),
        opt_accesses: Some(120),
        ..PolicyStats::new("Hawkeye", counts(120, 10, 0))
    };
    let rate = stats.opt_hit_rate().unwrap();
    assert!((rate - 25.0).abs() < f64::EPSILON);

    let zero = PolicyStats {
        opt_hits: Some(0),
        opt_accesses: Some(0),
        ..PolicyStats::default()
    };
    assert_eq!(zero.opt_hit_rate(), Some(0.0));
}

#[test]
fn json_omits_absent_fields() {
    let stats = PolicyStats::new("SRRIP", counts(4, 1, 2));
    assert_eq!(
        stats.to_json().unwrap(),
        r#"{"policy":"SRRIP","accesses":4,"hits":1,"writebacks":2}"#
    );

    let dueling = PolicyStats {
        psel: Some(511),
        ..stats
    };
    assert_eq!(
        dueling.to_json().unwrap(),
        r#"{"policy":"SRRIP","accesses":4,"hits":1,"writebacks":2,"psel":511}"#
    );
}

#[test]
fn render_lists_policy_internals() {
    let stats = PolicyStats {
        psel: Some(12),
        opt_hits: Some(1),
        opt_accesses: Some(4),
        trained_entries: Some(3),
        ..PolicyStats::new("Hawkeye", counts(10, 5, 1))
    };
    let report = stats.render("final");
    assert!(report.contains("Hawkeye REPLACEMENT STATISTICS (final)"));
    assert!(report.contains("llc.accesses           10"));
    assert!(report.contains("llc.hit_rate           50.00%"));
    assert!(report.contains("duel.psel              12"));
    assert!(report.contains("optgen.hit_rate        25.00%"));
    assert!(report.contains("predictor.trained      3"));
}

#[test]
fn render_skips_absent_sections() {
    let report = PolicyStats::new("LRU", counts(1, 0, 0)).render("heartbeat");
    assert!(!report.contains("duel.psel"));
    assert!(!report.contains("optgen"));
    assert!(!report.contains("predictor"));
}
