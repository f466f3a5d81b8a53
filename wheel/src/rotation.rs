//! Rotation planner: turns a chosen winner into a terminal wheel rotation.
//!
//! The wheel content rotates clockwise while the pointer stays fixed at
//! 12 o'clock. Segment angles use the arc convention (0° at 3 o'clock), so
//! the content angle under the pointer after rotating by `r` degrees is
//! `270 - r` (mod 360).

#[cfg(test)]
#[path = "rotation_test.rs"]
mod rotation_test;

use serde::Serialize;
use tracing::info;

use crate::consts::{FULL_TURN_DEG, POINTER_OFFSET_DEG};
use crate::participant::{ParticipantId, Settings};
use crate::pool::Pool;
use crate::segment::Segment;
use crate::select::{RandomSource, select_winner};

/// Everything a spin needs, captured once at spin start.
///
/// Later roster or settings changes never alter an in-flight plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinPlan {
    pub winner: ParticipantId,
    /// Midpoint of the landing wedge, in content degrees.
    pub target_angle: f64,
    /// Cumulative rotation the animation ends on.
    pub final_rotation: f64,
    pub duration_ms: u32,
}

/// Midpoint of one of `winner`'s raw segments, chosen uniformly.
///
/// Returns `None` if `winner` owns no segment or `rng` draws out of range.
pub fn target_angle_for_winner<R>(segments: &[Segment], winner: &ParticipantId, rng: &mut R) -> Option<f64>
where
    R: RandomSource + ?Sized,
{
    let owned: Vec<&Segment> = segments.iter().filter(|s| s.owner == *winner).collect();
    if owned.is_empty() {
        return None;
    }
    let pick = owned.get(rng.index(owned.len()))?;
    Some(pick.mid_angle())
}

/// Rotation that makes `min_full_turns` complete turns and leaves `target_angle` under the pointer.
#[must_use]
pub fn final_rotation(target_angle: f64, min_full_turns: u32) -> f64 {
    f64::from(min_full_turns) * FULL_TURN_DEG + (FULL_TURN_DEG - target_angle) - POINTER_OFFSET_DEG
}

/// Content angle in `[0, 360)` sitting under the pointer at `rotation` degrees.
#[must_use]
pub fn pointer_angle(rotation: f64) -> f64 {
    (FULL_TURN_DEG - POINTER_OFFSET_DEG - rotation).rem_euclid(FULL_TURN_DEG)
}

/// The segment under the pointer at `rotation` degrees.
#[must_use]
pub fn segment_at_pointer(segments: &[Segment], rotation: f64) -> Option<&Segment> {
    let angle = pointer_angle(rotation);
    segments.iter().find(|s| s.contains(angle))
}

/// Draw a winner from `pool`, choose a landing wedge among `raw_segments`, and plan the spin.
///
/// `raw_segments` must be the unmerged partition of the same `pool`.
/// Returns `None` when the pool is empty.
pub fn plan_spin<R>(pool: &Pool<'_>, raw_segments: &[Segment], settings: &Settings, rng: &mut R) -> Option<SpinPlan>
where
    R: RandomSource + ?Sized,
{
    let winner = select_winner(pool, rng)?;
    let target_angle = target_angle_for_winner(raw_segments, &winner.id, rng)?;
    let plan = SpinPlan {
        winner: winner.id.clone(),
        target_angle,
        final_rotation: final_rotation(target_angle, settings.min_full_turns),
        duration_ms: settings.spin_duration_ms,
    };
    info!(
        winner = %plan.winner,
        target_angle = plan.target_angle,
        final_rotation = plan.final_rotation,
        "spin planned"
    );
    Some(plan)
}
