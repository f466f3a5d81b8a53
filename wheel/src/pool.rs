//! Pool builder: expands participants into the ordered slot multiset.
//!
//! The pool is built in `base_slot_count` rounds. Each round walks the
//! participant list in order and appends one slot per eligible participant,
//! or `boost_multiplier` consecutive slots for a boosted one. Clustering the
//! boosted slots is what lets the segment merge step draw one wide wedge per
//! boosted participant per round.
//!
//! Pools borrow the participants they were built from. They are cheap to
//! rebuild and are never mutated after construction.

#[cfg(test)]
#[path = "pool_test.rs"]
mod pool_test;

use crate::participant::{Participant, ParticipantId, Settings};
use crate::weight::slot_count;

/// One unit of selection weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    pub participant: &'a Participant,
}

impl Slot<'_> {
    #[must_use]
    pub fn owner(&self) -> ParticipantId {
        self.participant.id.clone()
    }
}

/// Ordered sequence of slots. Order only matters for wedge adjacency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pool<'a> {
    slots: Vec<Slot<'a>>,
}

impl<'a> Pool<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Slot<'a>> {
        self.slots.get(index)
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot<'a>] {
        &self.slots
    }

    /// Owner ids in pool order.
    #[must_use]
    pub fn owners(&self) -> Vec<ParticipantId> {
        self.slots.iter().map(Slot::owner).collect()
    }

    /// Number of slots owned by `id`.
    #[must_use]
    pub fn count_for(&self, id: &ParticipantId) -> usize {
        self.slots.iter().filter(|s| s.participant.id == *id).count()
    }
}

/// Expand `participants` into a pool under `settings`.
///
/// Output order is fully determined by round index, list order, and boost
/// expansion. Returns an empty pool when nobody is eligible.
#[must_use]
pub fn build_pool<'a>(participants: &'a [Participant], settings: &Settings) -> Pool<'a> {
    let mut slots = Vec::new();
    for _round in 0..settings.base_slot_count {
        for participant in participants {
            if slot_count(participant, settings) == 0 {
                continue;
            }
            let repeat = if participant.boosted { settings.boost_multiplier } else { 1 };
            slots.extend((0..repeat).map(|_| Slot { participant }));
        }
    }
    Pool { slots }
}
