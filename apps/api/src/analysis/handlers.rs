//! Axum route handlers for the Analysis API.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::analysis::models::EvaluationResult;
use crate::analysis::service::analyze_cv;
use crate::errors::AppError;
use crate::extraction::extract_pdf_text;
use crate::render::{build_report, AnalysisReport};
use crate::state::AppState;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "cvText", default)]
    pub cv_text: Option<String>,
}

/// POST /api/analyzeCV
///
/// Analyzes already-extracted CV text and returns the normalized verdict.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<EvaluationResult>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let result = analyze_cv(
        request.cv_text.as_deref(),
        state.generator.as_ref(),
        &state.settings,
    )
    .await?;

    Ok(Json(result))
}

/// POST /api/analyzeCV/upload
///
/// Accepts a multipart PDF (`file` field), extracts its text and returns the
/// verdict together with the gauge and feedback view.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisReport>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        if let Some(content_type) = field.content_type() {
            if !is_pdf_media_type(content_type) {
                return Err(AppError::Validation(format!(
                    "Only PDF files are accepted (got '{content_type}')"
                )));
            }
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        info!(
            "Received upload {:?} ({} bytes)",
            file_name.as_deref().unwrap_or("<unnamed>"),
            bytes.len()
        );

        let text = extract_pdf_text(bytes, state.settings.max_upload_bytes).await?;
        let characters = text.chars().count();

        let evaluation =
            analyze_cv(Some(&text), state.generator.as_ref(), &state.settings).await?;

        return Ok(Json(build_report(file_name, characters, evaluation)));
    }

    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}

/// Any method other than POST (OPTIONS is answered by the CORS layer).
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Compares the media type only; parameters after `;` are ignored.
fn is_pdf_media_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|media| media.eq_ignore_ascii_case(PDF_CONTENT_TYPE))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}
