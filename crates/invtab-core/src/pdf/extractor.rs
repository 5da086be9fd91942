//! PDF text extraction using lopdf and pdf-extract.

use std::fs;
use std::path::Path;

use lopdf::Document;
use tracing::debug;

use super::{Result, TextExtractor};
use crate::error::PdfError;

/// PDF text extractor backed by pdf-extract.
///
/// lopdf is used up front to reject unreadable documents and to handle
/// empty-password encryption before text extraction runs.
#[derive(Debug, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String> {
        let fail = |reason: String| PdfError::TextExtraction {
            path: path.to_path_buf(),
            reason,
        };

        let data = fs::read(path).map_err(|e| fail(e.to_string()))?;
        let mut doc = Document::load_mem(&data).map_err(|e| fail(e.to_string()))?;

        // Handle PDFs with empty password encryption
        let raw = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted).map_err(|e| fail(e.to_string()))?;
            decrypted
        } else {
            data
        };

        if doc.get_pages().is_empty() {
            return Err(PdfError::NoPages);
        }

        let text = pdf_extract::extract_text_from_mem(&raw).map_err(|e| fail(e.to_string()))?;
        debug!(
            "extracted {} characters from {}",
            text.len(),
            path.display()
        );
        Ok(text)
    }
}
