#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use crate::participant::generate_id;

use super::*;
use crate::rotation::segment_at_pointer;

// =============================================================
// Helpers
// =============================================================

/// Replays indices from a shared queue, defaulting to 0 when drained.
struct ScriptedSource(Rc<RefCell<Vec<usize>>>);

impl RandomSource for ScriptedSource {
    fn index(&mut self, len: usize) -> usize {
        let mut queue = self.0.borrow_mut();
        if queue.is_empty() { 0 } else { queue.remove(0) % len }
    }
}

fn make(name: &str, excluded: bool, boosted: bool) -> Participant {
    let mut p = Participant::with_id(generate_id(), name, "#fff".into());
    p.excluded = excluded;
    p.boosted = boosted;
    p
}

fn scenario() -> (Roster, Vec<ParticipantId>) {
    let people = vec![make("A", false, false), make("B", true, false), make("C", false, true)];
    let ids = people.iter().map(|p| p.id.clone()).collect();
    (Roster::from(people), ids)
}

fn settings() -> Settings {
    Settings { base_slot_count: 1, boost_multiplier: 3, spin_duration_ms: 2000, min_full_turns: 3 }
}

fn scripted_core(roster: Roster, draws: &[usize]) -> WheelCore {
    let queue = Rc::new(RefCell::new(draws.to_vec()));
    WheelCore::with_random_source(roster, settings(), Box::new(ScriptedSource(queue)))
}

/// Tick every 16ms from `t0` until the spin settles; returns every action emitted.
fn run_to_completion(core: &mut WheelCore, t0: f64) -> Vec<Action> {
    let mut actions = Vec::new();
    let mut t = t0;
    while core.is_spinning() {
        actions.extend(core.tick(t));
        t += 16.0;
    }
    actions
}

// =============================================================
// Layout
// =============================================================

#[test]
fn new_core_computes_layout() {
    let (roster, ids) = scenario();
    let core = scripted_core(roster, &[]);
    assert_eq!(core.layout().raw.len(), 4);
    assert_eq!(core.layout().merged.len(), 2);
    assert_eq!(core.layout().merged[1].owner, ids[2]);
}

#[test]
fn edits_recompute_layout() {
    let (roster, ids) = scenario();
    let mut core = scripted_core(roster, &[]);

    assert!(core.toggle_excluded(&ids[1]));
    assert_eq!(core.layout().raw.len(), 5);

    assert!(core.toggle_boosted(&ids[2]));
    assert_eq!(core.layout().raw.len(), 3);

    assert!(core.remove_participant(&ids[0]));
    assert_eq!(core.layout().raw.len(), 2);

    core.set_settings(Settings { base_slot_count: 3, ..settings() });
    assert_eq!(core.layout().raw.len(), 6);

    let id = core.add_participant("D").unwrap();
    assert_eq!(core.layout().segments_for(&id).len(), 3);
}

#[test]
fn unknown_ids_leave_layout_alone() {
    let (roster, _) = scenario();
    let mut core = scripted_core(roster, &[]);
    let before = core.layout().clone();
    assert!(!core.toggle_boosted(&generate_id()));
    assert!(!core.remove_participant(&generate_id()));
    assert_eq!(core.layout(), &before);
}

#[test]
fn frame_reports_merged_segments() {
    let (roster, _) = scenario();
    let core = scripted_core(roster, &[]);
    let frame = core.frame();
    assert_eq!(frame.segments, core.layout().merged);
    assert_eq!(frame.rotation_deg, 0.0);
    assert!(!frame.is_spinning);
}

// =============================================================
// Spin
// =============================================================

#[test]
fn spin_refused_when_nobody_eligible() {
    let mut core = scripted_core(Roster::from(vec![make("A", true, false)]), &[]);
    assert!(!core.can_spin());
    assert_eq!(core.spin(), SpinOutcome::NoEligible);
    assert!(!core.is_spinning());
}

#[test]
fn spin_refused_on_empty_roster() {
    let mut core = scripted_core(Roster::new(), &[]);
    assert_eq!(core.spin(), SpinOutcome::NoEligible);
}

#[test]
fn spin_while_running_is_busy() {
    let (roster, _) = scenario();
    let mut core = scripted_core(roster, &[]);
    assert!(matches!(core.spin(), SpinOutcome::Started(_)));
    assert!(!core.can_spin());
    assert_eq!(core.spin(), SpinOutcome::Busy);
}

#[test]
fn scripted_spin_lands_on_first_slot() {
    let (roster, ids) = scenario();
    let mut core = scripted_core(roster, &[0, 0]);

    let SpinOutcome::Started(plan) = core.spin() else {
        panic!("spin should start");
    };
    assert_eq!(plan.winner, ids[0]);
    assert_eq!(plan.target_angle, 45.0);
    assert_eq!(plan.final_rotation, 3.0 * 360.0 + 315.0 - 90.0);
    assert_eq!(core.current_spin(), Some(&plan));
}

#[test]
fn winner_resolved_once_after_last_rotation() {
    let (roster, ids) = scenario();
    let mut core = scripted_core(roster, &[2, 0]);
    let SpinOutcome::Started(plan) = core.spin() else {
        panic!("spin should start");
    };
    assert_eq!(plan.winner, ids[2]);

    let actions = run_to_completion(&mut core, 500.0);
    let resolved: Vec<usize> = actions
        .iter()
        .enumerate()
        .filter(|(_, a)| matches!(a, Action::WinnerResolved(_)))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(resolved, [actions.len() - 1]);
    assert_eq!(actions[actions.len() - 2], Action::RotationChanged(plan.final_rotation));

    let mut prev = 0.0;
    for action in &actions {
        if let Action::RotationChanged(r) = action {
            assert!(*r >= prev);
            prev = *r;
        }
    }

    assert_eq!(core.winner().map(|p| &p.id), Some(&ids[2]));
    assert_eq!(core.rotation(), plan.final_rotation);
    assert!(core.current_spin().is_none());
    assert!(core.tick(1_000_000.0).is_empty());
}

#[test]
fn settled_rotation_points_at_winner() {
    let people = vec![make("A", false, true), make("B", false, false), make("C", false, false)];
    let roster = Roster::from(people);
    let mut core = WheelCore::with_random_source(
        roster,
        Settings { base_slot_count: 3, ..settings() },
        Box::new(RngSource::seeded(5)),
    );
    for round in 0..20 {
        let SpinOutcome::Started(plan) = core.spin() else {
            panic!("spin should start");
        };
        run_to_completion(&mut core, f64::from(round) * 10_000.0);
        let under = segment_at_pointer(&core.layout().raw, core.rotation()).unwrap();
        assert_eq!(under.owner, plan.winner);
    }
}

#[test]
fn edits_mid_spin_keep_snapshotted_plan() {
    let (roster, ids) = scenario();
    let mut core = scripted_core(roster, &[0, 0]);
    let SpinOutcome::Started(plan) = core.spin() else {
        panic!("spin should start");
    };
    core.tick(0.0);

    core.toggle_excluded(&ids[1]);
    core.set_settings(Settings { base_slot_count: 5, ..settings() });
    assert!(core.is_spinning());

    let actions = run_to_completion(&mut core, 16.0);
    assert_eq!(actions.last(), Some(&Action::WinnerResolved(ids[0].clone())));
    assert_eq!(core.rotation(), plan.final_rotation);
}

#[test]
fn winner_hidden_while_next_spin_runs() {
    let (roster, _) = scenario();
    let mut core = scripted_core(roster, &[]);
    core.spin();
    run_to_completion(&mut core, 0.0);
    assert!(core.winner().is_some());

    core.spin();
    assert!(core.winner().is_none());
}

#[test]
fn removed_winner_is_no_longer_reported() {
    let (roster, ids) = scenario();
    let mut core = scripted_core(roster, &[0, 0]);
    core.spin();
    run_to_completion(&mut core, 0.0);
    assert_eq!(core.winner().map(|p| &p.id), Some(&ids[0]));
    core.remove_participant(&ids[0]);
    assert!(core.winner().is_none());
}

#[test]
fn single_participant_always_wins() {
    let solo = make("Solo", false, false);
    let id = solo.id.clone();
    let mut core = WheelCore::with_random_source(Roster::from(vec![solo]), settings(), Box::new(RngSource::seeded(3)));
    assert_eq!(core.layout().raw.len(), 1);
    for round in 0..5 {
        let SpinOutcome::Started(plan) = core.spin() else {
            panic!("spin should start");
        };
        assert_eq!(plan.winner, id);
        assert_eq!(plan.target_angle, 180.0);
        run_to_completion(&mut core, f64::from(round) * 5_000.0);
    }
}
