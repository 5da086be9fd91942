//! Currency token extraction and normalization.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::CURRENCY;

/// Find all currency tokens in a line, in order of appearance.
pub fn find_currency_values(line: &str) -> Vec<String> {
    CURRENCY
        .find_iter(line)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Parse a currency string into a decimal, stripping the dollar sign and
/// thousands separators.
pub fn parse_currency_amount(value: &str) -> Option<Decimal> {
    let normalized: String = value.chars().filter(|c| *c != '$' && *c != ',').collect();
    Decimal::from_str(&normalized).ok()
}
