//! PDF text extraction module.

mod extractor;

pub use extractor::PdfTextExtractor;

use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text extraction implementations.
///
/// Downstream parsing depends only on the returned line sequence, never
/// on how it was produced.
pub trait TextExtractor {
    /// Extract the document text, pages concatenated in order.
    fn extract_text(&self, path: &Path) -> Result<String>;
}
