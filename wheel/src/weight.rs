//! Weight model: how many pool slots a participant is entitled to.

#[cfg(test)]
#[path = "weight_test.rs"]
mod weight_test;

use crate::participant::{Participant, Settings};

/// Number of slots `participant` contributes to the pool.
///
/// Excluded participants get zero. Everyone else gets `base_slot_count`,
/// multiplied by `boost_multiplier` when boosted. Settings are assumed
/// pre-validated; a zero base count simply yields zero. Widened to `u64` so
/// the product of two `u32` settings is exact and always equals the number
/// of slots [`crate::pool::build_pool`] emits.
#[must_use]
pub fn slot_count(participant: &Participant, settings: &Settings) -> u64 {
    if participant.excluded {
        return 0;
    }
    let base = u64::from(settings.base_slot_count);
    if participant.boosted {
        base * u64::from(settings.boost_multiplier)
    } else {
        base
    }
}

/// Sum of [`slot_count`] over every participant.
#[must_use]
pub fn total_slots(participants: &[Participant], settings: &Settings) -> u64 {
    participants
        .iter()
        .map(|p| slot_count(p, settings))
        .sum()
}

/// Probability that `participant` wins a single draw, or `None` when nobody is eligible.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn win_probability(participant: &Participant, participants: &[Participant], settings: &Settings) -> Option<f64> {
    let total = total_slots(participants, settings);
    if total == 0 {
        return None;
    }
    Some(slot_count(participant, settings) as f64 / total as f64)
}
