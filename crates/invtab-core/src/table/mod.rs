//! Tabular output module - CSV record writing and combination.

mod combine;
mod writer;

pub use combine::{CombineReport, combine_tables};
pub use writer::{COLUMNS, RecordWriter};

use crate::error::TableError;

/// Result type for tabular output operations.
pub type Result<T> = std::result::Result<T, TableError>;
