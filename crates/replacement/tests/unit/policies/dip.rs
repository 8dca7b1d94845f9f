//! DIP Policy Tests.
//!
//! 128 sets, 4 ways, DIP layout: `set % 64 == 1` LRU leaders, `== 2` BIP
//! leaders. Each recency stack starts as [0, 1, 2, 3] (way 3 at LRU).

use llc_replacement::ReplacementPolicy;
use llc_replacement::common::AccessType;
use llc_replacement::config::{DuelingConfig, Geometry};
use llc_replacement::policies::DipPolicy;
use rand::RngCore;
use rand::rngs::mock::StepRng;

const LRU_LEADER: usize = 1;
const BIP_LEADER: usize = 2;
const FOLLOWER: usize = 3;

fn dip<R: RngCore>(rng: R) -> DipPolicy<R> {
    DipPolicy::with_rng(Geometry::new(128, 4), &DuelingConfig::dip(), rng)
}

fn access<R: RngCore + Send + Sync>(policy: &mut DipPolicy<R>, set: usize, way: usize, hit: bool) {
    policy.update(set, way, 0x400200, 0x2000, AccessType::Load, hit);
}

#[test]
fn bip_leader_inserts_at_lru() {
    let mut policy = dip(StepRng::new(1, 0));
    access(&mut policy, BIP_LEADER, 0, false);
    assert_eq!(policy.get_victim(BIP_LEADER), 0);
    assert_eq!(policy.stack().ranks(BIP_LEADER), vec![3, 0, 1, 2]);
}

#[test]
fn bip_rare_draw_inserts_at_mru() {
    let mut policy = dip(StepRng::new(0, 0));
    access(&mut policy, BIP_LEADER, 3, false);
    assert_eq!(policy.stack().rank(BIP_LEADER, 3), 0);
    assert_eq!(policy.get_victim(BIP_LEADER), 2);
}

#[test]
fn lru_leader_inserts_at_mru() {
    let mut policy = dip(StepRng::new(1, 0));
    access(&mut policy, LRU_LEADER, 3, false);
    assert_eq!(policy.get_victim(LRU_LEADER), 2);
}

#[test]
fn bip_protects_reused_line_from_scan() {
    let mut policy = dip(StepRng::new(1, 0));
    access(&mut policy, BIP_LEADER, 0, true);
    for _ in 0..10 {
        let victim = policy.get_victim(BIP_LEADER);
        assert_ne!(victim, 0);
        access(&mut policy, BIP_LEADER, victim, false);
    }
    assert_eq!(policy.stack().rank(BIP_LEADER, 0), 0);
}

#[test]
fn followers_switch_to_bip_when_it_wins() {
    let mut policy = dip(StepRng::new(1, 0));
    access(&mut policy, FOLLOWER, 0, false);
    assert_eq!(policy.stack().rank(FOLLOWER, 0), 0);

    for _ in 0..600 {
        access(&mut policy, BIP_LEADER + 64, 1, true);
    }
    assert_eq!(policy.dueling().psel(), 0);
    access(&mut policy, FOLLOWER, 1, false);
    assert_eq!(policy.get_victim(FOLLOWER), 1);
}

#[test]
fn ranks_remain_a_permutation() {
    let mut policy = dip(StepRng::new(7, 13));
    for step in 0..200usize {
        let set = step % 4;
        let way = (step * 3) % 4;
        access(&mut policy, set, way, step % 5 == 0);
        let mut ranks = policy.stack().ranks(set);
        ranks.sort_unstable();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
    }
}

#[test]
fn stats_and_init() {
    let mut policy = dip(StepRng::new(1, 0));
    access(&mut policy, LRU_LEADER, 0, true);
    assert_eq!(policy.stats().psel, Some(512));
    assert_eq!(policy.stats().policy, "DIP");
    policy.init();
    assert_eq!(policy.stats().psel, Some(511));
    assert_eq!(policy.stats().accesses, 0);
}

#[test]
#[should_panic(expected = "BIP rare insertion odds must be non-zero")]
fn zero_rare_odds_is_rejected_at_construction() {
    let dueling = DuelingConfig {
        rare_insertion_odds: 0,
        ..DuelingConfig::dip()
    };
    let _ = DipPolicy::with_rng(Geometry::new(128, 4), &dueling, StepRng::new(1, 0));
}
