//! Saturating Counter Tests.
//!
//! Verifies clamping at both bounds, the `(max + 1) / 2` midpoint, and that no
//! sequence of steps ever leaves `[0, max]`.

use llc_replacement::common::SaturatingCounter;
use proptest::prelude::*;
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Construction
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(31, 16)]
#[case(511, 256)]
#[case(3, 2)]
#[case(1, 1)]
#[case(u16::MAX, 32768)]
fn midpoint_is_half_of_max_plus_one(#[case] max: u16, #[case] midpoint: u16) {
    let counter = SaturatingCounter::at_midpoint(max);
    assert_eq!(counter.value(), midpoint);
    assert_eq!(counter.midpoint(), midpoint);
    assert!(counter.is_at_least_midpoint());
}

#[test]
fn new_starts_at_zero() {
    let counter = SaturatingCounter::new(7);
    assert!(counter.is_zero());
    assert_eq!(counter.max(), 7);
    assert!(!counter.is_at_least_midpoint());
}

#[test]
fn with_value_clamps_to_max() {
    assert_eq!(SaturatingCounter::with_value(7, 100).value(), 7);
    assert_eq!(SaturatingCounter::with_value(7, 5).value(), 5);
}

// ══════════════════════════════════════════════════════════
// 2. Saturation
// ══════════════════════════════════════════════════════════

#[test]
fn increment_saturates_at_max() {
    let mut counter = SaturatingCounter::at_midpoint(31);
    for _ in 0..40 {
        counter.increment();
    }
    assert_eq!(counter.value(), 31);
    assert!(counter.is_saturated_high());
}

#[test]
fn decrement_saturates_at_zero() {
    let mut counter = SaturatingCounter::at_midpoint(31);
    for _ in 0..40 {
        counter.decrement();
    }
    assert!(counter.is_zero());
}

#[test]
fn reset_to_midpoint_restores_initial_value() {
    let mut counter = SaturatingCounter::at_midpoint(511);
    for _ in 0..100 {
        counter.decrement();
    }
    counter.reset_to_midpoint();
    assert_eq!(counter, SaturatingCounter::at_midpoint(511));
}

#[test]
fn threshold_is_inclusive() {
    let mut counter = SaturatingCounter::at_midpoint(31);
    assert!(counter.is_at_least_midpoint());
    counter.decrement();
    assert_eq!(counter.value(), 15);
    assert!(!counter.is_at_least_midpoint());
}

proptest! {
    #[test]
    fn never_leaves_bounds(max in 1u16..1024, steps in prop::collection::vec(any::<bool>(), 0..600)) {
        let mut counter = SaturatingCounter::at_midpoint(max);
        for up in steps {
            let before = counter.value();
            if up {
                counter.increment();
                prop_assert!(counter.value() == before + 1 || before == max);
            } else {
                counter.decrement();
                prop_assert!(counter.value() + 1 == before || before == 0);
            }
            prop_assert!(counter.value() <= max);
        }
    }
}
