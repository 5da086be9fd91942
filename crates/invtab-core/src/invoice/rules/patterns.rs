//! Regex patterns and marker tokens for invoice line classification.

use lazy_static::lazy_static;
use regex::Regex;

/// Literal token in the column header that opens the tabular section.
pub const HEADER_MARKER: &str = "Amount";

/// Prefix of the summary line that terminates the tabular section.
pub const TOTAL_MARKER: &str = "Total";

/// Substrings that flag a line as a shipping/backorder annotation.
pub const NOTE_MARKERS: [&str; 2] = ["BACKORDER", "SHIP"];

lazy_static! {
    /// Two-segment numeric part identifier, e.g. "123-456789".
    pub static ref PART_ID: Regex = Regex::new(r"\d+-\d+").unwrap();

    /// A line consisting solely of digits.
    pub static ref PURE_DIGITS: Regex = Regex::new(r"^\d+$").unwrap();

    /// Currency value: dollar sign, digits with optional thousands
    /// separators, exactly two decimals.
    pub static ref CURRENCY: Regex = Regex::new(r"\$[\d,]+\.\d{2}").unwrap();
}

/// Whether the line is a shipping/backorder annotation.
pub fn is_note(line: &str) -> bool {
    NOTE_MARKERS.iter().any(|marker| line.contains(marker))
}
