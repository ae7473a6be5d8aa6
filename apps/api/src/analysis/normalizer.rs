//! Response normalizer: turns untrusted model text into a schema-valid `EvaluationResult`.
//!
//! The model is treated as an unreliable source: every field is type-checked,
//! the category is recomputed locally, and nothing is passed through unchecked.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::analysis::models::{Category, EvaluationResult};

/// Used when the model returns no usable improvement suggestions.
pub const IMPROVEMENTS_FALLBACK: &str =
    "No se identificaron mejoras concretas; revisa que cada experiencia incluya logros medibles.";

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("AI response contains no recognizable JSON")]
    NoJson,

    #[error("AI response contains malformed JSON: {0}")]
    MalformedJson(String),

    #[error("AI response contains an invalid score: {0}")]
    InvalidScore(String),

    #[error("AI response contains forbidden language (matched '{0}')")]
    ForbiddenLanguage(String),
}

/// Scale the model is instructed to score on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreScale {
    /// 0–100, used as-is.
    #[default]
    Hundred,
    /// 1–10, rescaled ×10.
    Ten,
}

impl ScoreScale {
    fn bounds(self) -> (f64, f64) {
        match self {
            ScoreScale::Hundred => (0.0, 100.0),
            ScoreScale::Ten => (1.0, 10.0),
        }
    }

    fn to_hundred(self, raw: f64) -> f64 {
        match self {
            ScoreScale::Hundred => raw,
            ScoreScale::Ten => raw * 10.0,
        }
    }
}

/// Raises very low scores for long submissions. A heuristic, not a correctness guarantee.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreFloor {
    pub floor: f64,
    /// Minimum CV length (in chars) before the floor applies.
    pub min_chars: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizePolicy {
    pub scale: ScoreScale,
    pub score_floor: Option<ScoreFloor>,
    /// Lowercase terms whose presence in any text field rejects the result.
    pub forbidden_terms: Vec<String>,
}

/// Greedy span from the first `{` to the last `}`.
pub fn extract_json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Normalizes raw model output. `cv_chars` is the length of the submitted CV text.
pub fn normalize(
    raw: &str,
    policy: &NormalizePolicy,
    cv_chars: usize,
) -> Result<EvaluationResult, NormalizeError> {
    let span = extract_json_span(raw).ok_or(NormalizeError::NoJson)?;

    let parsed: Value =
        serde_json::from_str(span).map_err(|e| NormalizeError::MalformedJson(e.to_string()))?;
    let object = parsed.as_object().ok_or_else(|| {
        NormalizeError::MalformedJson("top-level value is not an object".to_string())
    })?;

    let mut score = coerce_score(object.get("score"), policy.scale)?;

    if let Some(floor) = &policy.score_floor {
        if cv_chars >= floor.min_chars && score < floor.floor {
            debug!(
                "Raising score {score} to floor {} (cv_chars={cv_chars})",
                floor.floor
            );
            score = floor.floor.min(100.0);
        }
    }

    let mut improvements = string_list(object, "improvements");
    if improvements.is_empty() {
        improvements.push(IMPROVEMENTS_FALLBACK.to_string());
    }

    let result = EvaluationResult {
        score,
        category: Category::from_score(score),
        summary: string_field(object, "summary"),
        strengths: string_list(object, "strengths"),
        improvements,
        ats_observations: string_list(object, "atsObservations"),
    };

    if let Some(term) = find_forbidden_term(&result, &policy.forbidden_terms) {
        return Err(NormalizeError::ForbiddenLanguage(term.to_string()));
    }

    Ok(result)
}

/// Accepts JSON numbers and numeric strings; rejects everything else.
fn coerce_score(value: Option<&Value>, scale: ScoreScale) -> Result<f64, NormalizeError> {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    let raw = match raw {
        Some(v) if v.is_finite() => v,
        _ => {
            return Err(NormalizeError::InvalidScore(format!(
                "expected a number, got {}",
                value.map(Value::to_string).unwrap_or_else(|| "nothing".into())
            )))
        }
    };

    let (min, max) = scale.bounds();
    if raw < min || raw > max {
        return Err(NormalizeError::InvalidScore(format!(
            "{raw} is outside [{min}, {max}]"
        )));
    }

    Ok(scale.to_hundred(raw))
}

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn string_list(object: &Map<String, Value>, key: &str) -> Vec<String> {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn find_forbidden_term<'a>(result: &EvaluationResult, terms: &'a [String]) -> Option<&'a str> {
    if terms.is_empty() {
        return None;
    }

    let texts = std::iter::once(&result.summary)
        .chain(&result.strengths)
        .chain(&result.improvements)
        .chain(&result.ats_observations);

    let words: Vec<Vec<String>> = texts.map(|t| words_of(t)).collect();

    terms.iter().map(String::as_str).find(|term| {
        let needle = words_of(term);
        !needle.is_empty()
            && words
                .iter()
                .any(|hay| hay.windows(needle.len()).any(|w| w == needle.as_slice()))
    })
}

fn words_of(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESPONSE: &str = r#"Claro, aquí tienes el análisis:
```json
{
  "score": 82,
  "category": "ELITE",
  "summary": "  Perfil backend con experiencia sólida en Rust.  ",
  "strengths": ["Experiencia en sistemas distribuidos", "Proyectos open source"],
  "improvements": ["Cuantificar el impacto de cada rol", "Agregar certificaciones", "Resumir la sección de educación"],
  "atsObservations": ["Usa encabezados estándar", "Evita tablas"]
}
```
Espero que te sirva."#;

    fn policy() -> NormalizePolicy {
        NormalizePolicy::default()
    }

    #[test]
    fn test_extracts_span_from_surrounding_prose() {
        let span = extract_json_span("antes {\"a\": {\"b\": 1}} después").unwrap();
        assert_eq!(span, "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn test_extract_span_requires_closing_brace_after_opening() {
        assert!(extract_json_span("} nada {").is_none());
        assert!(extract_json_span("sin llaves").is_none());
    }

    #[test]
    fn test_full_response_is_normalized() {
        let result = normalize(FULL_RESPONSE, &policy(), 300).unwrap();
        assert_eq!(result.score, 82.0);
        // Model claimed ELITE; recomputed from score.
        assert_eq!(result.category, Category::Solid);
        assert_eq!(result.summary, "Perfil backend con experiencia sólida en Rust.");
        assert_eq!(result.strengths.len(), 2);
        assert_eq!(result.improvements.len(), 3);
        assert_eq!(result.ats_observations, vec!["Usa encabezados estándar", "Evita tablas"]);
    }

    #[test]
    fn test_no_json_is_an_error_not_a_panic() {
        let err = normalize("Lo siento, no puedo ayudar con eso.", &policy(), 300).unwrap_err();
        assert!(matches!(err, NormalizeError::NoJson));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = normalize("{\"score\": 80, \"summary\": }", &policy(), 300).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedJson(_)));
    }

    #[test]
    fn test_greedy_span_across_two_objects_is_malformed() {
        let err = normalize("{\"score\": 80} y {\"score\": 70}", &policy(), 300).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedJson(_)));
    }

    #[test]
    fn test_non_numeric_score_is_invalid() {
        for raw in [
            r#"{"score": "alto"}"#,
            r#"{"score": null}"#,
            r#"{"score": true}"#,
            r#"{"score": [80]}"#,
            r#"{"score": "NaN"}"#,
            r#"{"summary": "sin puntaje"}"#,
        ] {
            let err = normalize(raw, &policy(), 300).unwrap_err();
            assert!(matches!(err, NormalizeError::InvalidScore(_)), "input: {raw}");
        }
    }

    #[test]
    fn test_out_of_range_score_is_invalid() {
        assert!(matches!(
            normalize(r#"{"score": 101}"#, &policy(), 300),
            Err(NormalizeError::InvalidScore(_))
        ));
        assert!(matches!(
            normalize(r#"{"score": -1}"#, &policy(), 300),
            Err(NormalizeError::InvalidScore(_))
        ));
    }

    #[test]
    fn test_numeric_string_score_is_coerced() {
        let result = normalize(r#"{"score": " 91 "}"#, &policy(), 300).unwrap();
        assert_eq!(result.score, 91.0);
        assert_eq!(result.category, Category::Elite);
    }

    #[test]
    fn test_ten_point_scale_is_rescaled() {
        let policy = NormalizePolicy {
            scale: ScoreScale::Ten,
            ..Default::default()
        };
        let top = normalize(r#"{"score": 10}"#, &policy, 300).unwrap();
        assert_eq!(top.score, 100.0);
        assert_eq!(top.category, Category::Elite);

        let mid = normalize(r#"{"score": 6}"#, &policy, 300).unwrap();
        assert_eq!(mid.score, 60.0);
        assert_eq!(mid.category, Category::Improvable);

        assert!(matches!(
            normalize(r#"{"score": 0}"#, &policy, 300),
            Err(NormalizeError::InvalidScore(_))
        ));
        assert!(matches!(
            normalize(r#"{"score": 85}"#, &policy, 300),
            Err(NormalizeError::InvalidScore(_))
        ));
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let result = normalize(r#"{"score": 40}"#, &policy(), 300).unwrap();
        assert_eq!(result.summary, "");
        assert!(result.strengths.is_empty());
        assert!(result.ats_observations.is_empty());
        assert_eq!(result.improvements, vec![IMPROVEMENTS_FALLBACK.to_string()]);
    }

    #[test]
    fn test_wrong_typed_fields_get_defaults() {
        let raw = r#"{
            "score": 60,
            "summary": 12,
            "strengths": "uno, dos",
            "improvements": [1, "  ", "Agregar enlaces a proyectos", null],
            "atsObservations": {"a": 1}
        }"#;
        let result = normalize(raw, &policy(), 300).unwrap();
        assert_eq!(result.summary, "");
        assert!(result.strengths.is_empty());
        assert_eq!(result.improvements, vec!["Agregar enlaces a proyectos"]);
        assert!(result.ats_observations.is_empty());
    }

    #[test]
    fn test_category_always_matches_score() {
        for (score, claimed) in [(95, "CRÍTICO"), (80, "ELITE"), (60, "SÓLIDO"), (10, "MEJORABLE")] {
            let raw = format!(r#"{{"score": {score}, "category": "{claimed}"}}"#);
            let result = normalize(&raw, &policy(), 300).unwrap();
            assert_eq!(result.category, Category::from_score(result.score));
        }
    }

    #[test]
    fn test_score_floor_applies_only_to_long_texts() {
        let policy = NormalizePolicy {
            score_floor: Some(ScoreFloor {
                floor: 40.0,
                min_chars: 1000,
            }),
            ..Default::default()
        };

        let short = normalize(r#"{"score": 10}"#, &policy, 999).unwrap();
        assert_eq!(short.score, 10.0);

        let long = normalize(r#"{"score": 10}"#, &policy, 1000).unwrap();
        assert_eq!(long.score, 40.0);
        assert_eq!(long.category, Category::Critical);

        let above = normalize(r#"{"score": 70}"#, &policy, 5000).unwrap();
        assert_eq!(above.score, 70.0);
    }

    #[test]
    fn test_forbidden_term_rejects_result() {
        let policy = NormalizePolicy {
            forbidden_terms: vec!["strengths".into(), "work experience".into()],
            ..Default::default()
        };
        let raw = r#"{"score": 70, "improvements": ["Add more Work Experience details"]}"#;
        match normalize(raw, &policy, 300) {
            Err(NormalizeError::ForbiddenLanguage(term)) => assert_eq!(term, "work experience"),
            other => panic!("expected ForbiddenLanguage, got {other:?}"),
        }
    }

    #[test]
    fn test_forbidden_term_matches_whole_words_only() {
        let policy = NormalizePolicy {
            forbidden_terms: vec!["the".into()],
            ..Default::default()
        };
        let raw = r#"{"score": 70, "summary": "Buen perfil para theorema y síntesis"}"#;
        assert!(normalize(raw, &policy, 300).is_ok());
    }
}
