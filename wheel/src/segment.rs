//! Segment partitioner: maps the pool onto angular wedges.
//!
//! Angles are in degrees, clockwise-positive, with 0° at 3 o'clock (the
//! standard arc convention). Raw segments are one equal-width wedge per slot
//! in pool order. Merged segments collapse consecutive same-owner wedges into
//! one wider wedge for drawing.
//!
//! The merge never wraps across the 0°/360° seam: a run at the end of the
//! circle stays separate from a same-owner run at the start.

#[cfg(test)]
#[path = "segment_test.rs"]
mod segment_test;

use serde::Serialize;
use tracing::debug;

use crate::consts::FULL_TURN_DEG;
use crate::participant::{Participant, ParticipantId, Settings};
use crate::pool::{Pool, build_pool};

/// A contiguous angular interval `[start_angle, end_angle)` owned by one participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub owner: ParticipantId,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Segment {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Angular midpoint.
    #[must_use]
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Whether `angle` (already normalized to `[0, 360)`) falls inside this wedge.
    #[must_use]
    pub fn contains(&self, angle: f64) -> bool {
        angle >= self.start_angle && angle < self.end_angle
    }
}

/// One equal-width segment per slot, in pool order, starting at 0°.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn partition(pool: &Pool<'_>) -> Vec<Segment> {
    if pool.is_empty() {
        return Vec::new();
    }
    let n = pool.len() as f64;
    pool.slots()
        .iter()
        .enumerate()
        .map(|(i, slot)| Segment {
            owner: slot.owner(),
            start_angle: FULL_TURN_DEG * i as f64 / n,
            end_angle: FULL_TURN_DEG * (i + 1) as f64 / n,
        })
        .collect()
}

/// Run-length merge of consecutive same-owner segments.
#[must_use]
pub fn merge_adjacent(segments: &[Segment]) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
    for seg in segments {
        match merged.last_mut() {
            Some(open) if open.owner == seg.owner => open.end_angle = seg.end_angle,
            _ => merged.push(seg.clone()),
        }
    }
    merged
}

/// Raw and merged segments for one (participants, settings) pair.
///
/// Recomputed from scratch whenever the inputs change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WheelLayout {
    /// One wedge per slot. Governs landing targets.
    pub raw: Vec<Segment>,
    /// Same-owner runs collapsed. Governs drawing.
    pub merged: Vec<Segment>,
}

impl WheelLayout {
    #[must_use]
    pub fn compute(participants: &[Participant], settings: &Settings) -> Self {
        let pool = build_pool(participants, settings);
        let layout = Self::from_pool(&pool);
        debug!(slots = pool.len(), wedges = layout.merged.len(), "wheel layout computed");
        layout
    }

    #[must_use]
    pub fn from_pool(pool: &Pool<'_>) -> Self {
        let raw = partition(pool);
        let merged = merge_adjacent(&raw);
        Self { raw, merged }
    }

    /// No eligible participants: nothing to draw and nothing to spin.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Raw segments owned by `id`, in angular order.
    #[must_use]
    pub fn segments_for(&self, id: &ParticipantId) -> Vec<&Segment> {
        self.raw.iter().filter(|s| s.owner == *id).collect()
    }
}
