//! Frame loop that drives a spin to completion.
//!
//! A tokio interval plays the role of the display's animation-frame
//! callback: each tick reads a monotonic clock and hands the timestamp to
//! [`WheelCore::tick`]. The loop ends when the core reports the winner.

use std::time::{Duration, Instant};

use tokio::time::MissedTickBehavior;
use tracing::trace;
use wheel::engine::{Action, SpinOutcome, WheelCore};
use wheel::participant::ParticipantId;
use wheel::rotation::SpinPlan;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SpinError {
    #[error("no eligible participants; add someone or clear an exclusion")]
    NoEligible,
    #[error("a spin is already in progress")]
    Busy,
    #[error("animation stopped without resolving a winner")]
    Interrupted,
}

/// What a finished spin looked like.
#[derive(Debug, Clone)]
pub struct SpinReport {
    pub plan: SpinPlan,
    pub winner: ParticipantId,
    /// Rotation updates emitted, including the final one.
    pub frames: usize,
}

/// Start a spin on `core` and tick it every `frame_interval` until it settles.
///
/// `on_frame` sees every emitted rotation, in order.
pub async fn run_spin<F>(core: &mut WheelCore, frame_interval: Duration, mut on_frame: F) -> Result<SpinReport, SpinError>
where
    F: FnMut(f64),
{
    let plan = match core.spin() {
        SpinOutcome::Started(plan) => plan,
        SpinOutcome::Busy => return Err(SpinError::Busy),
        SpinOutcome::NoEligible => return Err(SpinError::NoEligible),
    };

    let clock = Instant::now();
    let mut interval = tokio::time::interval(frame_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frames = 0;

    loop {
        interval.tick().await;
        let now_ms = clock.elapsed().as_secs_f64() * 1000.0;
        for action in core.tick(now_ms) {
            match action {
                Action::RotationChanged(rotation) => {
                    frames += 1;
                    trace!(rotation, now_ms, "frame");
                    on_frame(rotation);
                }
                Action::WinnerResolved(winner) => return Ok(SpinReport { plan, winner, frames }),
            }
        }
        if !core.is_spinning() {
            return Err(SpinError::Interrupted);
        }
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
