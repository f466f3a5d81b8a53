use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::animation::AnimationDriver;
use crate::participant::{Participant, ParticipantId, Roster, Settings};
use crate::pool::build_pool;
use crate::render::{self, WheelFrame};
use crate::rotation::{SpinPlan, plan_spin};
use crate::segment::WheelLayout;
use crate::select::{RandomSource, RngSource};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Events returned from frame ticks for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Redraw with this rotation.
    RotationChanged(f64),
    /// The spin settled; reveal this participant. Always follows the final `RotationChanged`.
    WinnerResolved(ParticipantId),
}

/// Answer to a spin request.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    /// The animation started toward this plan.
    Started(SpinPlan),
    /// A spin is already in flight; the request was ignored.
    Busy,
    /// Nobody is eligible; there is nothing to spin.
    NoEligible,
}

/// Core wheel state: everything that does not touch the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// The layout is recomputed from scratch after every roster or settings change.
pub struct WheelCore {
    roster: Roster,
    settings: Settings,
    layout: WheelLayout,
    driver: AnimationDriver,
    spin: Option<SpinPlan>,
    winner: Option<ParticipantId>,
    rng: Box<dyn RandomSource>,
}

impl Default for WheelCore {
    fn default() -> Self {
        Self::new(Roster::new(), Settings::default())
    }
}

impl WheelCore {
    #[must_use]
    pub fn new(roster: Roster, settings: Settings) -> Self {
        Self::with_random_source(roster, settings, Box::new(RngSource::from_os()))
    }

    /// Build a core whose winner and landing draws come from `rng`.
    #[must_use]
    pub fn with_random_source(roster: Roster, settings: Settings, rng: Box<dyn RandomSource>) -> Self {
        let layout = WheelLayout::compute(roster.as_slice(), &settings);
        Self { roster, settings, layout, driver: AnimationDriver::new(), spin: None, winner: None, rng }
    }

    fn relayout(&mut self) {
        self.layout = WheelLayout::compute(self.roster.as_slice(), &self.settings);
    }

    // --- Data inputs ---

    /// Replace the whole roster.
    pub fn set_roster(&mut self, roster: Roster) {
        self.roster = roster;
        self.relayout();
    }

    /// Replace the settings. An in-flight spin keeps its captured plan.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.relayout();
    }

    pub fn add_participant(&mut self, name: &str) -> Option<ParticipantId> {
        let id = self.roster.add(name)?;
        self.relayout();
        Some(id)
    }

    pub fn remove_participant(&mut self, id: &ParticipantId) -> bool {
        let changed = self.roster.remove(id);
        if changed {
            self.relayout();
        }
        changed
    }

    pub fn toggle_excluded(&mut self, id: &ParticipantId) -> bool {
        let changed = self.roster.toggle_excluded(id);
        if changed {
            self.relayout();
        }
        changed
    }

    pub fn toggle_boosted(&mut self, id: &ParticipantId) -> bool {
        let changed = self.roster.toggle_boosted(id);
        if changed {
            self.relayout();
        }
        changed
    }

    // --- Spin ---

    /// Whether a spin request would start an animation right now.
    #[must_use]
    pub fn can_spin(&self) -> bool {
        !self.driver.is_running() && !self.layout.is_empty()
    }

    /// Request a spin: pick the winner, plan the rotation, and start animating.
    ///
    /// The plan is snapshotted here; later edits do not retarget it.
    pub fn spin(&mut self) -> SpinOutcome {
        if self.driver.is_running() {
            return SpinOutcome::Busy;
        }
        let pool = build_pool(self.roster.as_slice(), &self.settings);
        let Some(plan) = plan_spin(&pool, &self.layout.raw, &self.settings, self.rng.as_mut()) else {
            return SpinOutcome::NoEligible;
        };
        self.winner = None;
        self.driver.start(&plan);
        self.spin = Some(plan.clone());
        SpinOutcome::Started(plan)
    }

    /// Advance the animation to the frame at `timestamp_ms`.
    pub fn tick(&mut self, timestamp_ms: f64) -> Vec<Action> {
        let Some(step) = self.driver.tick(timestamp_ms) else {
            return Vec::new();
        };
        let mut actions = vec![Action::RotationChanged(step.rotation)];
        if step.completed {
            if let Some(plan) = self.spin.take() {
                tracing::info!(winner = %plan.winner, rotation = step.rotation, "spin settled");
                self.winner = Some(plan.winner.clone());
                actions.push(Action::WinnerResolved(plan.winner));
            }
        }
        actions
    }

    // --- Queries ---

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    #[must_use]
    pub fn layout(&self) -> &WheelLayout {
        &self.layout
    }

    /// The plan of the spin currently animating, if any.
    #[must_use]
    pub fn current_spin(&self) -> Option<&SpinPlan> {
        self.spin.as_ref()
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.driver.rotation()
    }

    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.driver.is_running()
    }

    /// The last resolved winner, looked up in the current roster.
    ///
    /// `None` while spinning, before the first spin, or if the winner has since been removed.
    #[must_use]
    pub fn winner(&self) -> Option<&Participant> {
        self.winner.as_ref().and_then(|id| self.roster.get(id))
    }

    /// Everything the renderer needs for one frame.
    #[must_use]
    pub fn frame(&self) -> WheelFrame {
        WheelFrame {
            segments: self.layout.merged.clone(),
            rotation_deg: self.rotation(),
            is_spinning: self.is_spinning(),
        }
    }
}

/// The full wheel engine. Wraps `WheelCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: WheelCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, roster: Roster, settings: Settings) -> Self {
        Self { canvas, core: WheelCore::new(roster, settings) }
    }

    // --- Delegated inputs ---

    pub fn set_roster(&mut self, roster: Roster) {
        self.core.set_roster(roster);
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.core.set_settings(settings);
    }

    pub fn spin(&mut self) -> SpinOutcome {
        self.core.spin()
    }

    /// Advance one animation frame; call from `requestAnimationFrame` with its timestamp.
    pub fn tick(&mut self, timestamp_ms: f64) -> Vec<Action> {
        self.core.tick(timestamp_ms)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or any `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let size = f64::from(self.canvas.width().min(self.canvas.height()));
        render::draw(&ctx, &self.core.frame(), self.core.roster(), size)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn frame(&self) -> WheelFrame {
        self.core.frame()
    }

    #[must_use]
    pub fn winner(&self) -> Option<&Participant> {
        self.core.winner()
    }
}
