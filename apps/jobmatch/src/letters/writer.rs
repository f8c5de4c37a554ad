//! Writes the rendered cover letters to their destination file, replacing
//! whatever was there before.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::errors::AppError;

/// Writes `content` to `path` in one step: the text goes to a temp file in the
/// same directory which is then renamed over the destination. Readers never
/// see a half-written file.
pub fn write_letters(path: &Path, content: &str) -> Result<(), AppError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let storage = |e: std::io::Error| {
        AppError::Storage(format!("Failed to write {}: {e}", path.display()))
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(storage)?;
    tmp.write_all(content.as_bytes()).map_err(storage)?;
    tmp.flush().map_err(storage)?;
    tmp.persist(path).map_err(|e| storage(e.error))?;

    info!("Wrote {} bytes of cover letters to {}", content.len(), path.display());
    Ok(())
}
