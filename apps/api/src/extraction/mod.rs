// Document text extraction.
// PDF parsing is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod pdf;

pub use pdf::{extract_pdf_text, ExtractError};
