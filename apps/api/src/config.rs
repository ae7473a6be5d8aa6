use anyhow::{bail, Context, Result};

use crate::analysis::normalizer::{NormalizePolicy, ScoreFloor, ScoreScale};
use crate::analysis::service::AnalysisSettings;

const DEFAULT_GEMINI_MODEL: &str = "gemma-3-1b-it";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Ask the model for `application/json` output. Gemma models reject this.
    pub gemini_json_mode: bool,
    pub port: u16,
    pub rust_log: String,
    pub analysis: AnalysisSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = AnalysisSettings::default();

        let score_floor = match optional_env("SCORE_FLOOR") {
            Some(raw) => Some(ScoreFloor {
                floor: raw
                    .parse::<f64>()
                    .context("SCORE_FLOOR must be a number")?,
                min_chars: parse_env_or("SCORE_FLOOR_MIN_CHARS", 1500)?,
            }),
            None => None,
        };

        let forbidden_terms = optional_env("FORBIDDEN_TERMS")
            .map(|raw| parse_term_list(&raw))
            .unwrap_or_default();

        let analysis = AnalysisSettings {
            min_chars: parse_env_or("CV_MIN_CHARS", defaults.min_chars)?,
            max_chars: parse_env_or("CV_MAX_CHARS", defaults.max_chars)?,
            max_upload_bytes: parse_env_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            policy: NormalizePolicy {
                scale: parse_scale(optional_env("SCORE_SCALE").as_deref())?,
                score_floor,
                forbidden_terms,
            },
        };

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: optional_env("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: optional_env("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_json_mode: parse_env_or("GEMINI_JSON_MODE", false)?,
            port: parse_env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            analysis,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn parse_scale(raw: Option<&str>) -> Result<ScoreScale> {
    match raw {
        None | Some("100") => Ok(ScoreScale::Hundred),
        Some("10") => Ok(ScoreScale::Ten),
        Some(other) => bail!("SCORE_SCALE must be '100' or '10', got '{other}'"),
    }
}

fn parse_term_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
