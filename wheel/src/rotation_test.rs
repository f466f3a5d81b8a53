#![allow(clippy::float_cmp)]

use crate::participant::generate_id;

use super::*;
use crate::participant::Participant;
use crate::pool::build_pool;
use crate::segment::partition;
use crate::select::RngSource;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

struct FixedSource(Vec<usize>);

impl RandomSource for FixedSource {
    fn index(&mut self, len: usize) -> usize {
        if self.0.is_empty() { 0 } else { self.0.remove(0) % len }
    }
}

fn make(name: &str, excluded: bool, boosted: bool) -> Participant {
    let mut p = Participant::with_id(generate_id(), name, "#fff".into());
    p.excluded = excluded;
    p.boosted = boosted;
    p
}

fn settings(base: u32, mult: u32) -> Settings {
    Settings { base_slot_count: base, boost_multiplier: mult, ..Settings::default() }
}

// =============================================================
// final_rotation
// =============================================================

#[test]
fn final_rotation_reference_value() {
    assert_eq!(final_rotation(90.0, 3), 1260.0);
}

#[test]
fn final_rotation_grows_by_full_turns() {
    assert_eq!(final_rotation(45.0, 4) - final_rotation(45.0, 3), 360.0);
}

#[test]
fn final_rotation_lands_target_under_pointer() {
    for target in [0.5, 45.0, 90.0, 179.0, 270.0, 359.5] {
        let r = final_rotation(target, 3);
        assert!(approx_eq(pointer_angle(r), target), "target {target}");
    }
}

#[test]
fn pointer_angle_at_rest_is_twelve_oclock() {
    assert_eq!(pointer_angle(0.0), 270.0);
}

// =============================================================
// target_angle_for_winner
// =============================================================

#[test]
fn target_angle_none_for_unknown_owner() {
    let people = vec![make("A", false, false)];
    let raw = partition(&build_pool(&people, &settings(1, 2)));
    assert!(target_angle_for_winner(&raw, &generate_id(), &mut FixedSource(vec![])).is_none());
}

#[test]
fn target_angle_single_segment_is_180() {
    let people = vec![make("A", false, false)];
    let raw = partition(&build_pool(&people, &settings(1, 2)));
    assert_eq!(target_angle_for_winner(&raw, &people[0].id, &mut FixedSource(vec![])), Some(180.0));
}

#[test]
fn target_angle_picks_among_all_owned_wedges() {
    let people = vec![make("A", false, false), make("B", false, false)];
    let raw = partition(&build_pool(&people, &settings(2, 2)));
    // A owns wedges 0 and 2 of 4 (midpoints 45 and 225).
    let first = target_angle_for_winner(&raw, &people[0].id, &mut FixedSource(vec![0]));
    let second = target_angle_for_winner(&raw, &people[0].id, &mut FixedSource(vec![1]));
    assert_eq!(first, Some(45.0));
    assert_eq!(second, Some(225.0));
}

#[test]
fn target_angle_none_when_source_draws_out_of_range() {
    struct OutOfRange;
    impl RandomSource for OutOfRange {
        fn index(&mut self, len: usize) -> usize {
            len
        }
    }
    let people = vec![make("A", false, true)];
    let raw = partition(&build_pool(&people, &settings(2, 3)));
    assert!(target_angle_for_winner(&raw, &people[0].id, &mut OutOfRange).is_none());
}

// =============================================================
// plan_spin
// =============================================================

#[test]
fn plan_spin_empty_pool_is_none() {
    let people = vec![make("A", true, false)];
    let pool = build_pool(&people, &settings(1, 2));
    let raw = partition(&pool);
    assert!(plan_spin(&pool, &raw, &settings(1, 2), &mut FixedSource(vec![])).is_none());
}

#[test]
fn plan_spin_uses_settings() {
    let people = vec![make("A", false, false), make("B", true, false), make("C", false, true)];
    let s = Settings { min_full_turns: 5, spin_duration_ms: 3100, ..settings(1, 3) };
    let pool = build_pool(&people, &s);
    let raw = partition(&pool);

    let plan = plan_spin(&pool, &raw, &s, &mut FixedSource(vec![0, 0])).unwrap();
    assert_eq!(plan.winner, people[0].id);
    assert_eq!(plan.target_angle, 45.0);
    assert_eq!(plan.final_rotation, 5.0 * 360.0 + 315.0 - 90.0);
    assert_eq!(plan.duration_ms, 3100);
}

#[test]
fn planned_rotation_always_stops_on_winner() {
    let people = vec![make("A", false, true), make("B", false, false), make("C", true, true), make("D", false, false)];
    let s = settings(3, 4);
    let pool = build_pool(&people, &s);
    let raw = partition(&pool);
    let mut rng = RngSource::seeded(11);

    for _ in 0..500 {
        let plan = plan_spin(&pool, &raw, &s, &mut rng).unwrap();
        let under = segment_at_pointer(&raw, plan.final_rotation).unwrap();
        assert_eq!(under.owner, plan.winner);
        assert!(plan.final_rotation >= f64::from(s.min_full_turns) * 360.0 - 90.0);
    }
}
