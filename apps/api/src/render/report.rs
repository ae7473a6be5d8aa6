//! Report view sent to the upload client: the verdict plus a ready-to-draw gauge.

use serde::Serialize;

use crate::analysis::models::EvaluationResult;
use crate::render::gauge::{
    animation_frames, render_svg, score_label, sweep_radians, GaugeColor, ANIMATION_STEP,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeView {
    pub value: f64,
    pub label: String,
    pub band: GaugeColor,
    pub color: &'static str,
    pub sweep_radians: f64,
    /// Values to display frame by frame, ending at `value`.
    pub keyframes: Vec<f64>,
    pub svg: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub file_name: Option<String>,
    /// Characters of text extracted from the document.
    pub characters: usize,
    pub evaluation: EvaluationResult,
    pub gauge: GaugeView,
    /// Items for the feedback list (the improvement suggestions).
    pub feedback: Vec<String>,
}

pub fn build_gauge(score: f64) -> GaugeView {
    let band = GaugeColor::for_score(score);
    GaugeView {
        value: score,
        label: score_label(score),
        band,
        color: band.hex(),
        sweep_radians: sweep_radians(score),
        keyframes: animation_frames(score, ANIMATION_STEP),
        svg: render_svg(score),
    }
}

pub fn build_report(
    file_name: Option<String>,
    characters: usize,
    evaluation: EvaluationResult,
) -> AnalysisReport {
    let gauge = build_gauge(evaluation.score);
    let feedback = evaluation.improvements.clone();
    AnalysisReport {
        file_name,
        characters,
        evaluation,
        gauge,
        feedback,
    }
}
