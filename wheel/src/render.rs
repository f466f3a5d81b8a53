//! Rendering: draws the wheel to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only [`WheelFrame`] plus the roster (for names and
//! colors) and produces pixels. It never mutates wheel state.
//!
//! Wedges are drawn in the rotated frame using the same angle convention as
//! [`crate::segment::Segment`]: degrees, clockwise-positive, 0° at 3 o'clock.
//! The pointer is drawn unrotated at 12 o'clock.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{HUB_RADIUS_PX, LABEL_MAX_WIDTH_RATIO, LABEL_OFFSET_RATIO, LABEL_TRUNCATE_CHARS, RIM_MARGIN_PX};
use crate::participant::Roster;
use crate::segment::Segment;

/// Fill for a wedge whose owner is missing from the roster.
const FALLBACK_FILL: &str = "#CCCCCC";

/// Pointer triangle half-width in CSS pixels.
const POINTER_HALF_WIDTH_PX: f64 = 15.0;

/// Pointer triangle height in CSS pixels.
const POINTER_HEIGHT_PX: f64 = 25.0;

/// Everything the renderer consumes for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelFrame {
    /// Merged segments, in angular order.
    pub segments: Vec<Segment>,
    /// Current wheel rotation in degrees.
    pub rotation_deg: f64,
    pub is_spinning: bool,
}

/// Shorten `name` to its first few characters plus an ellipsis.
#[must_use]
pub fn truncate_label(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.chars().count() <= LABEL_TRUNCATE_CHARS {
        return trimmed.to_owned();
    }
    let head: String = trimmed.chars().take(LABEL_TRUNCATE_CHARS).collect();
    format!("{head}...")
}

/// Draw the full wheel into a square of `size` CSS pixels.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, frame: &WheelFrame, roster: &Roster, size: f64) -> Result<(), JsValue> {
    let center = size / 2.0;
    let radius = center - RIM_MARGIN_PX;

    ctx.clear_rect(0.0, 0.0, size, size);
    if radius <= 0.0 {
        return Ok(());
    }

    // Layer 1: wedges and labels in the rotated frame.
    ctx.save();
    ctx.translate(center, center)?;
    ctx.rotate(frame.rotation_deg.to_radians())?;
    for seg in &frame.segments {
        let (name, fill) = roster
            .get(&seg.owner)
            .map_or(("", FALLBACK_FILL), |p| (p.name.as_str(), p.color.as_str()));
        draw_wedge(ctx, seg, radius, fill)?;
        draw_label(ctx, seg, radius, name)?;
    }
    ctx.restore();

    // Layer 2: fixed chrome.
    draw_hub(ctx, center)?;
    draw_rim(ctx, center, radius)?;
    draw_pointer(ctx, center);

    Ok(())
}

// =============================================================
// Wedges
// =============================================================

fn draw_wedge(ctx: &CanvasRenderingContext2d, seg: &Segment, radius: f64, fill: &str) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.move_to(0.0, 0.0);
    ctx.arc(0.0, 0.0, radius, seg.start_angle.to_radians(), seg.end_angle.to_radians())?;
    ctx.close_path();

    ctx.set_fill_style_str(fill);
    ctx.fill();

    ctx.set_stroke_style_str("#FFFFFF");
    ctx.set_line_width(2.0);
    ctx.stroke();
    Ok(())
}

fn draw_label(ctx: &CanvasRenderingContext2d, seg: &Segment, radius: f64, name: &str) -> Result<(), JsValue> {
    if name.is_empty() {
        return Ok(());
    }
    ctx.save();
    ctx.rotate(seg.mid_angle().to_radians())?;
    ctx.set_text_align("left");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str("#000000");
    ctx.set_font("bold 16px sans-serif");

    let label = fit_label(ctx, name, radius * LABEL_MAX_WIDTH_RATIO);
    ctx.fill_text(&label, radius * LABEL_OFFSET_RATIO, 0.0)?;
    ctx.restore();
    Ok(())
}

fn fit_label(ctx: &CanvasRenderingContext2d, name: &str, max_w: f64) -> String {
    if measured_text_width(ctx, name) <= max_w {
        name.to_owned()
    } else {
        truncate_label(name)
    }
}

fn measured_text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    match ctx.measure_text(text) {
        Ok(metrics) => metrics.width(),
        Err(_) => f64::INFINITY,
    }
}

// =============================================================
// Chrome
// =============================================================

fn draw_hub(ctx: &CanvasRenderingContext2d, center: f64) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(center, center, HUB_RADIUS_PX, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str("#FFFFFF");
    ctx.fill();
    ctx.set_stroke_style_str("#333333");
    ctx.set_line_width(3.0);
    ctx.stroke();
    Ok(())
}

fn draw_rim(ctx: &CanvasRenderingContext2d, center: f64, radius: f64) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(center, center, radius + 5.0, 0.0, 2.0 * PI)?;
    ctx.set_stroke_style_str("#333333");
    ctx.set_line_width(4.0);
    ctx.stroke();
    Ok(())
}

fn draw_pointer(ctx: &CanvasRenderingContext2d, center: f64) {
    ctx.begin_path();
    ctx.move_to(center - POINTER_HALF_WIDTH_PX, 0.0);
    ctx.line_to(center + POINTER_HALF_WIDTH_PX, 0.0);
    ctx.line_to(center, POINTER_HEIGHT_PX);
    ctx.close_path();
    ctx.set_fill_style_str("#EF4444");
    ctx.fill();
}
