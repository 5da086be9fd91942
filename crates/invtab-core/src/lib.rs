//! Core library for invoice tabulation.
//!
//! This crate provides:
//! - PDF text extraction (lopdf + pdf-extract)
//! - Heuristic line-item parsing of extracted invoice text
//! - CSV record writing and multi-file combination
//! - Pipeline directory configuration

pub mod error;
pub mod models;
pub mod pdf;
pub mod invoice;
pub mod table;

pub use error::{InvtabError, Result};
pub use models::config::InvtabConfig;
pub use models::line_item::LineItem;
pub use pdf::{PdfTextExtractor, TextExtractor};
pub use invoice::{InvoiceLineParser, LineParser, ParsedInvoice};
pub use table::{CombineReport, RecordWriter, combine_tables};
