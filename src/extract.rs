//! PDF text extraction.
//!
//! Pages are extracted individually and joined with a single `\n`, in
//! document order. Extraction is synchronous and CPU-bound; async callers
//! should run it on the blocking pool.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("PDF extraction failed: {0}")]
    Pdf(String),
}

/// Extracts the text of the PDF stored at `path`.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    extract_pdf(&bytes)
}

/// Extracts the text of an in-memory PDF.
///
/// `pdf-extract` panics on some malformed documents; a panic is reported as
/// [`ExtractError::Pdf`] like any other parse failure.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| ExtractError::Pdf("extractor panicked on malformed input".to_string()))?
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;
    Ok(pages.join("\n"))
}
