//! Résumé text extraction. Thin wrapper over `pdf-extract`; page texts come
//! back concatenated in page order.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Résumé file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read PDF: {0}")]
    Pdf(String),

    #[error("PDF contains no extractable text")]
    Empty,

    #[error("Extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Extracts the full text of the PDF at `path`.
pub fn extract_text_from_pdf(path: impl AsRef<Path>) -> Result<String, ExtractError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ExtractError::NotFound(path.to_path_buf()));
    }

    let text = pdf_extract::extract_text(path).map_err(|e| ExtractError::Pdf(e.to_string()))?;
    info!("Extracted {} chars from {}", text.len(), path.display());
    non_empty(text)
}

/// Extracts the full text of an in-memory PDF (e.g. a multipart upload).
pub fn extract_text_from_bytes(bytes: &[u8]) -> Result<String, ExtractError> {
    let text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;
    debug!("Extracted {} chars from {} byte upload", text.len(), bytes.len());
    non_empty(text)
}

/// Runs [`extract_text_from_pdf`] on the blocking pool.
pub async fn extract_text_from_pdf_async(path: PathBuf) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || extract_text_from_pdf(path)).await?
}

/// Runs [`extract_text_from_bytes`] on the blocking pool.
pub async fn extract_text_from_bytes_async(bytes: bytes::Bytes) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || extract_text_from_bytes(&bytes)).await?
}

fn non_empty(text: String) -> Result<String, ExtractError> {
    if text.trim().is_empty() {
        Err(ExtractError::Empty)
    } else {
        Ok(text)
    }
}
