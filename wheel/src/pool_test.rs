use crate::participant::generate_id;

use super::*;

fn make(name: &str, excluded: bool, boosted: bool) -> Participant {
    let mut p = Participant::with_id(generate_id(), name, "#fff".into());
    p.excluded = excluded;
    p.boosted = boosted;
    p
}

fn settings(base: u32, mult: u32) -> Settings {
    Settings { base_slot_count: base, boost_multiplier: mult, ..Settings::default() }
}

fn names(pool: &Pool<'_>) -> Vec<String> {
    pool.slots().iter().map(|s| s.participant.name.clone()).collect()
}

#[test]
fn empty_list_gives_empty_pool() {
    let pool = build_pool(&[], &settings(3, 2));
    assert!(pool.is_empty());
}

#[test]
fn all_excluded_gives_empty_pool() {
    let people = vec![make("A", true, false), make("B", true, true)];
    assert!(build_pool(&people, &settings(2, 3)).is_empty());
}

#[test]
fn zero_rounds_gives_empty_pool() {
    let people = vec![make("A", false, false)];
    assert!(build_pool(&people, &settings(0, 3)).is_empty());
}

#[test]
fn scenario_excluded_and_boosted() {
    let people = vec![make("A", false, false), make("B", true, false), make("C", false, true)];
    let pool = build_pool(&people, &settings(1, 3));
    assert_eq!(names(&pool), ["A", "C", "C", "C"]);
}

#[test]
fn rounds_repeat_list_order() {
    let people = vec![make("A", false, false), make("B", false, false)];
    let pool = build_pool(&people, &settings(3, 2));
    assert_eq!(names(&pool), ["A", "B", "A", "B", "A", "B"]);
}

#[test]
fn boosted_slots_cluster_per_round() {
    let people = vec![make("A", false, true), make("B", false, false)];
    let pool = build_pool(&people, &settings(2, 2));
    assert_eq!(names(&pool), ["A", "A", "B", "A", "A", "B"]);
}

#[test]
fn per_participant_count_matches_weight() {
    let people = vec![make("A", false, true), make("B", false, false), make("C", true, true)];
    let s = settings(4, 3);
    let pool = build_pool(&people, &s);
    for p in &people {
        assert_eq!(pool.count_for(&p.id), slot_count(p, &s) as usize);
    }
    assert_eq!(pool.len(), 12 + 4);
}

#[test]
fn build_is_deterministic() {
    let people = vec![make("A", false, true), make("B", false, false)];
    let s = settings(3, 4);
    assert_eq!(build_pool(&people, &s).owners(), build_pool(&people, &s).owners());
}

#[test]
fn get_out_of_range_is_none() {
    let people = vec![make("A", false, false)];
    let pool = build_pool(&people, &settings(1, 2));
    assert!(pool.get(0).is_some());
    assert!(pool.get(1).is_none());
}
