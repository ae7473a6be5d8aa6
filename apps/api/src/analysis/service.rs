//! Analysis pipeline: validate CV text → build prompt → one model call → normalize.

use tracing::{info, warn};

use crate::analysis::models::EvaluationResult;
use crate::analysis::normalizer::{normalize, NormalizePolicy, ScoreScale};
use crate::analysis::prompts::{CV_ANALYSIS_PROMPT, HUNDRED_SCALE_RULES, TEN_SCALE_RULES};
use crate::errors::AppError;
use crate::llm_client::prompts::SPANISH_JSON_ONLY;
use crate::llm_client::TextGenerator;

pub const MISSING_CV_TEXT: &str = "cvText es requerido";

/// Limits and normalization policy for one deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    /// Shorter CV texts are rejected as input errors.
    pub min_chars: usize,
    /// Longer CV texts are truncated before prompting.
    pub max_chars: usize,
    pub max_upload_bytes: usize,
    pub policy: NormalizePolicy,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            min_chars: 50,
            max_chars: 30_000,
            max_upload_bytes: 5 * 1024 * 1024,
            policy: NormalizePolicy::default(),
        }
    }
}

pub fn build_prompt(cv_text: &str, scale: ScoreScale) -> String {
    let scale_rules = match scale {
        ScoreScale::Hundred => HUNDRED_SCALE_RULES,
        ScoreScale::Ten => TEN_SCALE_RULES,
    };
    // cv_text last so placeholders inside the CV are never expanded
    CV_ANALYSIS_PROMPT
        .replace("{rules}", SPANISH_JSON_ONLY)
        .replace("{scale_rules}", scale_rules)
        .replace("{cv_text}", cv_text)
}

/// Trims, checks length and truncates. Returns the text to send upstream.
pub fn prepare_cv_text<'a>(
    cv_text: Option<&'a str>,
    settings: &AnalysisSettings,
) -> Result<&'a str, AppError> {
    let text = cv_text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(AppError::Validation(MISSING_CV_TEXT.to_string()));
    }

    let chars = text.chars().count();
    if chars < settings.min_chars {
        return Err(AppError::Validation(format!(
            "cvText es demasiado corto ({chars} caracteres, mínimo {})",
            settings.min_chars
        )));
    }

    match text.char_indices().nth(settings.max_chars) {
        Some((cut, _)) => {
            warn!(
                "CV text truncated from {chars} to {} characters",
                settings.max_chars
            );
            Ok(&text[..cut])
        }
        None => Ok(text),
    }
}

/// Runs the full analysis for one CV. Single upstream call, no retries.
pub async fn analyze_cv(
    cv_text: Option<&str>,
    generator: &dyn TextGenerator,
    settings: &AnalysisSettings,
) -> Result<EvaluationResult, AppError> {
    let text = prepare_cv_text(cv_text, settings)?;
    let cv_chars = text.chars().count();

    let prompt = build_prompt(text, settings.policy.scale);
    let raw = generator.generate(&prompt).await?;

    let result = normalize(&raw, &settings.policy, cv_chars)?;

    info!(
        "CV analyzed: chars={cv_chars} score={} category={}",
        result.score,
        result.category.label()
    );

    Ok(result)
}
