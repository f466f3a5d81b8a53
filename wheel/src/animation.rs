//! Animation driver: the spin state machine.
//!
//! `AnimState` is the whole state. [`step`] is a pure function from a state
//! and a frame timestamp to the next state, the rotation to display, and
//! whether the spin completed on this frame. [`AnimationDriver`] wraps it for
//! callers that own a scheduler (a browser animation frame loop, a tokio
//! interval, a test's virtual clock).
//!
//! Timestamps are milliseconds on any monotonic clock. The first tick of a
//! spin defines its start time.

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use crate::rotation::SpinPlan;

/// Cubic ease-out: fast start, smooth stop.
#[must_use]
pub fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(3)
}

/// Spin animation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimState {
    /// No spin in progress; showing the last settled rotation.
    Idle {
        rotation: f64,
    },
    /// A spin is animating toward `final_rotation`.
    Running {
        /// Terminal rotation captured at spin start.
        final_rotation: f64,
        duration_ms: f64,
        /// Set on the first tick.
        start_ms: Option<f64>,
        /// Last emitted rotation; keeps output non-decreasing.
        last_rotation: f64,
    },
    /// The spin finished exactly on `rotation`.
    Settled {
        rotation: f64,
    },
}

impl Default for AnimState {
    fn default() -> Self {
        Self::Idle { rotation: 0.0 }
    }
}

impl AnimState {
    /// Fresh running state for a spin toward `final_rotation`.
    ///
    /// `final_rotation` is expected to be non-negative, which holds whenever
    /// `min_full_turns >= 1`. A negative target still settles on its exact
    /// value, but intermediate frames stay pinned at 0 because emitted
    /// rotation never decreases.
    #[must_use]
    pub fn running(final_rotation: f64, duration_ms: u32) -> Self {
        Self::Running { final_rotation, duration_ms: f64::from(duration_ms), start_ms: None, last_rotation: 0.0 }
    }

    /// Rotation currently on screen.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        match *self {
            Self::Idle { rotation } | Self::Settled { rotation } => rotation,
            Self::Running { last_rotation, .. } => last_rotation,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

/// Result of advancing the state machine by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub state: AnimState,
    /// Rotation to display for this frame.
    pub rotation: f64,
    /// True only on the frame that entered `Settled`.
    pub completed: bool,
}

/// Advance `state` to the frame at `timestamp_ms`.
///
/// Idle and Settled states are fixed points. A Running state with a
/// non-positive duration settles on its first tick.
#[must_use]
pub fn step(state: AnimState, timestamp_ms: f64) -> Step {
    let AnimState::Running { final_rotation, duration_ms, start_ms, last_rotation } = state else {
        return Step { state, rotation: state.rotation(), completed: false };
    };

    let start = start_ms.unwrap_or(timestamp_ms);
    let progress = if duration_ms > 0.0 {
        ((timestamp_ms - start) / duration_ms).clamp(0.0, 1.0)
    } else {
        1.0
    };

    if progress >= 1.0 {
        let settled = AnimState::Settled { rotation: final_rotation };
        return Step { state: settled, rotation: final_rotation, completed: true };
    }

    let rotation = (final_rotation * ease_out_cubic(progress)).max(last_rotation);
    let next = AnimState::Running { final_rotation, duration_ms, start_ms: Some(start), last_rotation: rotation };
    Step { state: next, rotation, completed: false }
}

/// Frame-driven owner of an [`AnimState`].
#[derive(Debug, Clone, Default)]
pub struct AnimationDriver {
    state: AnimState,
}

impl AnimationDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating toward `plan.final_rotation`.
    ///
    /// Returns false (and changes nothing) while a spin is already running.
    pub fn start(&mut self, plan: &SpinPlan) -> bool {
        if self.state.is_running() {
            return false;
        }
        self.state = AnimState::running(plan.final_rotation, plan.duration_ms);
        true
    }

    /// Advance by one frame. Returns `None` when no spin is running.
    pub fn tick(&mut self, timestamp_ms: f64) -> Option<Step> {
        if !self.state.is_running() {
            return None;
        }
        let next = step(self.state, timestamp_ms);
        self.state = next.state;
        Some(next)
    }

    #[must_use]
    pub fn state(&self) -> AnimState {
        self.state
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.state.rotation()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }
}
