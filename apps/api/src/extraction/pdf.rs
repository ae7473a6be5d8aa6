//! PDF text extraction wrapper around `pdf-extract`.
//!
//! Handles oversized payloads, non-PDF bytes, corrupted documents (including
//! panics inside the parser) and scanned PDFs without a text layer.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

const PDF_MAGIC: &[u8] = b"%PDF";
const PAGE_BREAK: char = '\u{c}';

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    #[error("Only PDF files are accepted")]
    NotPdf,

    #[error("Unreadable PDF document: {0}")]
    Unreadable(String),

    #[error("PDF contains no extractable text")]
    NoText,

    #[error("PDF extraction task failed: {0}")]
    Worker(String),
}

/// Extracts the text of every page, in page order.
/// Lines keep single spaces between runs; pages are separated by a newline.
pub async fn extract_pdf_text(bytes: Bytes, max_bytes: usize) -> Result<String, ExtractError> {
    validate_pdf(&bytes, max_bytes)?;

    let size = bytes.len();
    let raw = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| {
        if e.is_panic() {
            warn!("pdf-extract panicked on a {size} byte document");
            ExtractError::Unreadable("parser failed on malformed content".to_string())
        } else {
            ExtractError::Worker(e.to_string())
        }
    })?
    .map_err(ExtractError::Unreadable)?;

    let text = tidy_text(&raw);
    if text.is_empty() {
        return Err(ExtractError::NoText);
    }

    debug!("Extracted {} characters from {size} byte PDF", text.len());
    Ok(text)
}

fn validate_pdf(bytes: &[u8], max_bytes: usize) -> Result<(), ExtractError> {
    if bytes.len() > max_bytes {
        return Err(ExtractError::TooLarge {
            size: bytes.len(),
            limit: max_bytes,
        });
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ExtractError::NotPdf);
    }
    Ok(())
}

/// Collapses whitespace runs, drops blank lines and joins pages with `\n`.
fn tidy_text(raw: &str) -> String {
    raw.split(PAGE_BREAK)
        .map(|page| {
            page.lines()
                .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
