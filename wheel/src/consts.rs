//! Shared numeric constants for the wheel crate.

// ── Geometry ────────────────────────────────────────────────────

/// Degrees in one full turn of the wheel.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Offset between the arc convention's zero (3 o'clock) and the pointer (12 o'clock).
pub const POINTER_OFFSET_DEG: f64 = 90.0;

// ── Settings defaults ───────────────────────────────────────────

/// Repeat rounds applied to every eligible participant.
pub const DEFAULT_BASE_SLOT_COUNT: u32 = 1;

/// Slot multiplier for boosted participants.
pub const DEFAULT_BOOST_MULTIPLIER: u32 = 3;

/// Spin animation length in milliseconds.
pub const DEFAULT_SPIN_DURATION_MS: u32 = 2800;

/// Full turns the wheel makes before settling on the winner.
pub const DEFAULT_MIN_FULL_TURNS: u32 = 3;

// ── Settings ranges (configuration layer only) ──────────────────

pub const BASE_SLOT_COUNT_RANGE: (u32, u32) = (1, 5);
pub const BOOST_MULTIPLIER_RANGE: (u32, u32) = (2, 10);
pub const SPIN_DURATION_MS_RANGE: (u32, u32) = (2000, 4000);

// ── Persistence ─────────────────────────────────────────────────

/// Version tag written into every stored state record.
pub const STATE_VERSION: u32 = 1;

// ── Rendering ───────────────────────────────────────────────────

/// Gap between the canvas edge and the wheel rim, in CSS pixels.
pub const RIM_MARGIN_PX: f64 = 10.0;

/// Radius of the center hub, in CSS pixels.
pub const HUB_RADIUS_PX: f64 = 30.0;

/// Labels start at this fraction of the radius.
pub const LABEL_OFFSET_RATIO: f64 = 0.5;

/// Labels may span at most this fraction of the radius.
pub const LABEL_MAX_WIDTH_RATIO: f64 = 0.4;

/// Characters kept before the ellipsis when a label overflows.
pub const LABEL_TRUNCATE_CHARS: usize = 8;
