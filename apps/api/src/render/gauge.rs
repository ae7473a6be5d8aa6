//! Circular score gauge: color banding, arc geometry, animation keyframes and SVG.
//!
//! Geometry follows the canvas conventions the browser client uses: the arc starts
//! at angle 0 (3 o'clock) and sweeps clockwise by `2π · score / 100`.

use std::f64::consts::PI;

use serde::Serialize;

pub const CANVAS_SIZE: f64 = 200.0;
pub const STROKE_WIDTH: f64 = 10.0;
pub const TRACK_COLOR: &str = "rgba(255,255,255,0.1)";
/// Score points advanced per animation frame.
pub const ANIMATION_STEP: f64 = 2.0;

/// Score band colors. Must stay identical to the web client for visual parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeColor {
    Success,
    Primary,
    Warning,
    Danger,
}

impl GaugeColor {
    /// ≥80 success, ≥60 primary, ≥40 warning, else danger.
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            GaugeColor::Success
        } else if score >= 60.0 {
            GaugeColor::Primary
        } else if score >= 40.0 {
            GaugeColor::Warning
        } else {
            GaugeColor::Danger
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            GaugeColor::Success => "#10b981",
            GaugeColor::Primary => "#6366f1",
            GaugeColor::Warning => "#f59e0b",
            GaugeColor::Danger => "#ef4444",
        }
    }
}

/// Arc sweep in radians for a 0–100 score. Out-of-range input is clamped.
pub fn sweep_radians(score: f64) -> f64 {
    2.0 * PI * score.clamp(0.0, 100.0) / 100.0
}

/// Displayed values from 0 up to `target`, `step` points apart.
/// The last frame is always exactly `target`.
pub fn animation_frames(target: f64, step: f64) -> Vec<f64> {
    let target = target.clamp(0.0, 100.0);
    let step = if step > 0.0 { step } else { target.max(1.0) };

    let mut frames = Vec::new();
    let mut value = 0.0;
    while value < target {
        frames.push(value);
        value += step;
    }
    frames.push(target);
    frames
}

/// `85%`, or `72.5%` for fractional scores.
pub fn score_label(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}%", score as i64)
    } else {
        format!("{:.1}%", score)
    }
}

/// Renders the gauge as a standalone SVG document.
pub fn render_svg(score: f64) -> String {
    let center = CANVAS_SIZE / 2.0;
    let radius = CANVAS_SIZE / 2.0 - STROKE_WIDTH;
    let color = GaugeColor::for_score(score).hex();
    let sweep = sweep_radians(score);

    let track = format!(
        r#"<circle cx="{center}" cy="{center}" r="{radius}" fill="none" stroke="{TRACK_COLOR}" stroke-width="{STROKE_WIDTH}"/>"#
    );

    let arc = if sweep <= 0.0 {
        String::new()
    } else if sweep >= 2.0 * PI {
        format!(
            r#"<circle cx="{center}" cy="{center}" r="{radius}" fill="none" stroke="{color}" stroke-width="{STROKE_WIDTH}"/>"#
        )
    } else {
        let (start_x, start_y) = (center + radius, center);
        let end_x = center + radius * sweep.cos();
        let end_y = center + radius * sweep.sin();
        let large_arc = u8::from(sweep > PI);
        format!(
            r#"<path d="M {start_x:.2} {start_y:.2} A {radius} {radius} 0 {large_arc} 1 {end_x:.2} {end_y:.2}" fill="none" stroke="{color}" stroke-width="{STROKE_WIDTH}"/>"#
        )
    };

    let label = format!(
        r#"<text x="{center}" y="{center}" fill="{color}" text-anchor="middle" dominant-baseline="central" font-size="32">{}</text>"#,
        score_label(score)
    );

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CANVAS_SIZE}" height="{CANVAS_SIZE}" viewBox="0 0 {CANVAS_SIZE} {CANVAS_SIZE}">{track}{arc}{label}</svg>"#
    )
}
