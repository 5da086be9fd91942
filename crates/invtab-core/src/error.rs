//! Error types for the invtab-core library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the invtab library.
#[derive(Error, Debug)]
pub enum InvtabError {
    /// PDF text extraction error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Tabular output error.
    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF text extraction.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Failed to extract text from a document.
    #[error("failed to extract text from {}: {reason}", .path.display())]
    TextExtraction { path: PathBuf, reason: String },
}

/// Errors related to CSV writing and combination.
#[derive(Error, Debug)]
pub enum TableError {
    /// A required input directory does not exist.
    #[error("input directory not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// No matching tabular files were found.
    #[error("no CSV files found in {}", .0.display())]
    NoFiles(PathBuf),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the invtab library.
pub type Result<T> = std::result::Result<T, InvtabError>;
