//! Heuristic line-item parser for extracted invoice text.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::line_item::{LineItem, set_if_absent};

use super::rules::{
    currency::{find_currency_values, parse_currency_amount},
    patterns::{HEADER_MARKER, PART_ID, PURE_DIGITS, TOTAL_MARKER, is_note},
};

/// Result of parsing one text document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInvoice {
    /// Finalized line items in document order.
    pub items: Vec<LineItem>,
    /// Number of items emitted.
    pub items_processed: usize,
}

/// Trait for line-item parsing.
pub trait LineParser {
    /// Parse one document's text into line items.
    fn parse(&self, text: &str) -> ParsedInvoice;
}

/// Parser state over one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Discarding lines until the column header is seen.
    ScanningForHeader,
    /// Collecting lines into the current item.
    Accumulating,
    /// A summary line was reached; remaining lines are ignored.
    Done,
}

/// Accumulator for the item currently being assembled.
///
/// `last_order_line` starts at 0, meaning no item has been seen yet; the
/// buffer holds the current item's non-note lines for description
/// inference.
#[derive(Debug, Default)]
struct Accumulator {
    current: Option<LineItem>,
    buffer: Vec<String>,
    last_order_line: u64,
}

/// Heuristic line-item parser.
///
/// Reconstructs structured line items from whitespace-delimited invoice
/// text with no reliable field delimiters. Lines are classified one at a
/// time with no lookahead; fields fill first-match-wins and are never
/// overwritten.
pub struct InvoiceLineParser {
    validate_amounts: bool,
}

impl InvoiceLineParser {
    /// Create a new parser with amount validation disabled.
    pub fn new() -> Self {
        Self {
            validate_amounts: false,
        }
    }

    /// Set the diagnostic amount validation.
    ///
    /// When enabled, every finalized item's quantity x unit price is
    /// checked against its amount and the result logged. Emitted output
    /// is never affected.
    pub fn with_amount_validation(mut self, validate: bool) -> Self {
        self.validate_amounts = validate;
        self
    }

    /// A pure-digit line opens a new item when it continues the sequence
    /// (or is the first number seen, whatever its value) and the current
    /// item, if any, is complete. Digits arriving while an item is still
    /// incomplete belong to that item (typically as its ship quantity).
    fn next_order_line(line: &str, acc: &Accumulator) -> Option<u64> {
        if !PURE_DIGITS.is_match(line) {
            return None;
        }
        let n: u64 = line.parse().ok()?;
        if acc.last_order_line != 0 && n != acc.last_order_line + 1 {
            return None;
        }
        if acc.current.as_ref().is_some_and(|item| !item.is_complete()) {
            return None;
        }
        Some(n)
    }

    /// Classify one buffered line and fill whichever fields it matches.
    fn extract_fields(item: &mut LineItem, line: &str, buffer: &[String]) {
        if item.part_id.is_none() {
            if let Some(m) = PART_ID.find(line) {
                set_if_absent(&mut item.part_id, m.as_str());
                debug!("order line {}: part id {}", item.order_line, m.as_str());
            }
        }

        if item.ship_qty.is_none() && PURE_DIGITS.is_match(line) {
            set_if_absent(&mut item.ship_qty, line);
        }

        if line.contains('$') {
            let values = find_currency_values(line);
            match values.len() {
                0 => {}
                1 => {
                    // One value fills whichever price field is next expected.
                    if item.unit_price.is_none() {
                        set_if_absent(&mut item.unit_price, &values[0]);
                    } else {
                        set_if_absent(&mut item.amount, &values[0]);
                    }
                }
                _ => {
                    // A pair sets unit price and amount in one step, but
                    // only while both are still unset.
                    if item.unit_price.is_none() && item.amount.is_none() {
                        set_if_absent(&mut item.unit_price, &values[0]);
                        set_if_absent(&mut item.amount, &values[1]);
                    }
                }
            }
        }

        if item.description.is_none() && buffer.len() > 1 {
            if let Some(part_id) = item.part_id.clone() {
                let candidate = buffer.iter().find(|buffered| {
                    buffered.as_str() != part_id
                        && !PURE_DIGITS.is_match(buffered)
                        && !buffered.contains('$')
                });
                if let Some(desc) = candidate {
                    set_if_absent(&mut item.description, desc);
                }
            }
        }
    }

    fn emit(&self, item: LineItem, result: &mut ParsedInvoice) {
        if self.validate_amounts {
            self.validate_item(&item);
        }
        debug!("emitting order line {}", item.order_line);
        result.items.push(item);
        result.items_processed += 1;
    }

    /// Diagnostic arithmetic check: quantity x unit price must equal the
    /// amount within an absolute tolerance of 0.01. Observational only.
    fn validate_item(&self, item: &LineItem) {
        let (Some(qty), Some(price), Some(amount)) = (
            item.ship_qty.as_deref(),
            item.unit_price.as_deref(),
            item.amount.as_deref(),
        ) else {
            warn!(
                "order line {}: validation error: missing quantity or price fields",
                item.order_line
            );
            return;
        };

        let parsed = qty.parse::<i64>().ok().and_then(|q| {
            let price = parse_currency_amount(price)?;
            let amount = parse_currency_amount(amount)?;
            Some((Decimal::from(q), price, amount))
        });

        match parsed {
            Some((qty, price, amount)) => {
                let expected = qty * price;
                if (expected - amount).abs() > Decimal::new(1, 2) {
                    warn!(
                        "order line {}: validation failed: {} x {} = {}, not {}",
                        item.order_line, qty, price, expected, amount
                    );
                } else {
                    debug!("order line {}: validation passed", item.order_line);
                }
            }
            None => warn!(
                "order line {}: validation error: unparsable numeric field",
                item.order_line
            ),
        }
    }
}

impl Default for InvoiceLineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser for InvoiceLineParser {
    fn parse(&self, text: &str) -> ParsedInvoice {
        let mut state = ParseState::ScanningForHeader;
        let mut acc = Accumulator::default();
        let mut result = ParsedInvoice::default();

        for raw in text.lines() {
            let line = raw.trim();

            match state {
                ParseState::ScanningForHeader => {
                    if line.contains(HEADER_MARKER) {
                        debug!("found {:?} header, starting accumulation", HEADER_MARKER);
                        state = ParseState::Accumulating;
                    }
                }
                ParseState::Accumulating => {
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with(TOTAL_MARKER) {
                        if let Some(item) = acc.current.take() {
                            self.emit(item, &mut result);
                        }
                        state = ParseState::Done;
                    } else if let Some(n) = Self::next_order_line(line, &acc) {
                        if let Some(item) = acc.current.take() {
                            self.emit(item, &mut result);
                        }
                        acc.current = Some(LineItem::new(n));
                        acc.last_order_line = n;
                        acc.buffer.clear();
                    } else if let Some(item) = acc.current.as_mut() {
                        if is_note(line) {
                            item.notes.push(line.to_string());
                        } else {
                            acc.buffer.push(line.to_string());
                            Self::extract_fields(item, line, &acc.buffer);
                        }
                    }
                }
                ParseState::Done => break,
            }
        }

        // End of input: flush the trailing item only if it is complete.
        if state == ParseState::Accumulating {
            if let Some(item) = acc.current.take() {
                if item.is_complete() {
                    self.emit(item, &mut result);
                } else {
                    debug!("dropping incomplete trailing item {}", item.order_line);
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_lines(lines: &[&str]) -> ParsedInvoice {
        InvoiceLineParser::new().parse(&lines.join("\n"))
    }

    #[test]
    fn test_end_to_end_single_item() {
        let parsed = parse_lines(&[
            "Amount",
            "1",
            "123-456",
            "Widget A",
            "2",
            "$5.00 $10.00",
            "Total",
        ]);

        assert_eq!(parsed.items_processed, 1);
        let item = &parsed.items[0];
        assert_eq!(item.order_line, 1);
        assert_eq!(item.part_id.as_deref(), Some("123-456"));
        assert_eq!(item.description.as_deref(), Some("Widget A"));
        assert_eq!(item.ship_qty.as_deref(), Some("2"));
        assert_eq!(item.unit_price.as_deref(), Some("$5.00"));
        assert_eq!(item.amount.as_deref(), Some("$10.00"));
        assert!(item.notes.is_empty());
    }

    #[test]
    fn test_no_header_means_no_items() {
        let parsed = parse_lines(&["1", "123-456", "Widget", "2", "$5.00 $10.00", "Total"]);
        assert!(parsed.items.is_empty());
        assert_eq!(parsed.items_processed, 0);
    }

    #[test]
    fn test_lines_before_first_item_are_ignored() {
        let parsed = parse_lines(&[
            "Amount",
            "stray 999-888 header residue",
            "1",
            "123-456",
            "Widget",
            "2",
            "$5.00 $10.00",
            "Total",
        ]);

        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].part_id.as_deref(), Some("123-456"));
    }

    #[test]
    fn test_first_item_accepts_any_number() {
        let parsed = parse_lines(&[
            "Amount",
            "7",
            "123-456",
            "Widget",
            "3",
            "$5.00 $15.00",
            "Total",
        ]);

        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].order_line, 7);
        assert_eq!(parsed.items[0].ship_qty.as_deref(), Some("3"));
    }

    #[test]
    fn test_sequential_items_are_split() {
        let parsed = parse_lines(&[
            "Amount",
            "1",
            "111-222",
            "Widget A",
            "4",
            "$1.00 $4.00",
            "2",
            "333-444",
            "Widget B",
            "5",
            "$2.00 $10.00",
            "Total",
        ]);

        assert_eq!(parsed.items_processed, 2);
        assert_eq!(parsed.items[0].order_line, 1);
        assert_eq!(parsed.items[0].part_id.as_deref(), Some("111-222"));
        assert_eq!(parsed.items[0].ship_qty.as_deref(), Some("4"));
        assert_eq!(parsed.items[1].order_line, 2);
        assert_eq!(parsed.items[1].description.as_deref(), Some("Widget B"));
        assert_eq!(parsed.items[1].amount.as_deref(), Some("$10.00"));
    }

    #[test]
    fn test_non_sequential_digits_become_ship_qty() {
        let parsed = parse_lines(&[
            "Amount",
            "1",
            "123-456",
            "Widget",
            "9",
            "$5.00 $45.00",
            "Total",
        ]);

        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].ship_qty.as_deref(), Some("9"));
    }

    #[test]
    fn test_total_flushes_incomplete_item() {
        let parsed = parse_lines(&["Amount", "1", "123-456", "Total"]);

        assert_eq!(parsed.items.len(), 1);
        let item = &parsed.items[0];
        assert_eq!(item.order_line, 1);
        assert_eq!(item.part_id.as_deref(), Some("123-456"));
        assert!(item.ship_qty.is_none());
        assert!(item.unit_price.is_none());
    }

    #[test]
    fn test_eof_drops_incomplete_item() {
        let parsed = parse_lines(&["Amount", "1", "123-456", "Widget"]);
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_eof_flushes_complete_item() {
        let parsed = parse_lines(&["Amount", "1", "123-456", "Widget", "5", "$2.00 $10.00"]);

        assert_eq!(parsed.items.len(), 1);
        assert!(parsed.items[0].is_complete());
    }

    #[test]
    fn test_single_currency_values_fill_in_order() {
        let parsed = parse_lines(&[
            "Amount",
            "1",
            "123-456",
            "Widget",
            "2",
            "$5.00",
            "$10.00",
            "Total",
        ]);

        let item = &parsed.items[0];
        assert_eq!(item.unit_price.as_deref(), Some("$5.00"));
        assert_eq!(item.amount.as_deref(), Some("$10.00"));
    }

    #[test]
    fn test_price_fields_are_never_overwritten() {
        let parsed = parse_lines(&[
            "Amount",
            "1",
            "123-456",
            "Widget",
            "2",
            "$5.00 $10.00",
            "$99.99",
            "Total",
        ]);

        let item = &parsed.items[0];
        assert_eq!(item.unit_price.as_deref(), Some("$5.00"));
        assert_eq!(item.amount.as_deref(), Some("$10.00"));
    }

    #[test]
    fn test_currency_pair_needs_both_fields_unset() {
        let parsed = parse_lines(&[
            "Amount",
            "1",
            "123-456",
            "Widget",
            "2",
            "$5.00",
            "$7.00 $8.00",
            "Total",
        ]);

        let item = &parsed.items[0];
        assert_eq!(item.unit_price.as_deref(), Some("$5.00"));
        assert!(item.amount.is_none());
    }

    #[test]
    fn test_note_lines_never_feed_field_extraction() {
        let parsed = parse_lines(&[
            "Amount",
            "1",
            "SHIP VIA UPS 999-888",
            "123-456",
            "Widget",
            "BACKORDERED $4.00",
            "2",
            "$5.00 $10.00",
            "Total",
        ]);

        let item = &parsed.items[0];
        assert_eq!(item.part_id.as_deref(), Some("123-456"));
        assert_eq!(item.description.as_deref(), Some("Widget"));
        assert_eq!(item.unit_price.as_deref(), Some("$5.00"));
        assert_eq!(
            item.notes,
            vec![
                "SHIP VIA UPS 999-888".to_string(),
                "BACKORDERED $4.00".to_string()
            ]
        );
    }

    #[test]
    fn test_description_skips_part_id_digits_and_currency() {
        let parsed = parse_lines(&[
            "Amount",
            "1",
            "3",
            "123-456",
            "Widget",
            "$5.00 $15.00",
            "Total",
        ]);

        let item = &parsed.items[0];
        assert_eq!(item.ship_qty.as_deref(), Some("3"));
        assert_eq!(item.description.as_deref(), Some("Widget"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "Amount\n1\n123-456\nWidget A\n2\n$5.00 $10.00\n2 ON BACKORDER\nTotal";
        let parser = InvoiceLineParser::new();
        assert_eq!(parser.parse(text), parser.parse(text));
    }

    #[test]
    fn test_validation_never_alters_output() {
        let text = "Amount\n1\n123-456\nWidget\n3\n$5.00 $10.00\nTotal";
        let plain = InvoiceLineParser::new().parse(text);
        let validated = InvoiceLineParser::new()
            .with_amount_validation(true)
            .parse(text);
        assert_eq!(plain, validated);
    }

    #[test]
    fn test_parser_state_does_not_leak_across_documents() {
        let parser = InvoiceLineParser::new();
        parser.parse("Amount\n1\n123-456\nWidget\n2\n$5.00 $10.00\nTotal");

        // A fresh document starts its own sequence.
        let second = parser.parse("Amount\n5\n987-654\nGadget\n1\n$3.00 $3.00\nTotal");
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].order_line, 5);
    }

    #[test]
    fn test_items_processed_matches_emitted_items() {
        let parsed = parse_lines(&[
            "Amount",
            "1",
            "111-222",
            "Widget A",
            "4",
            "$1.00 $4.00",
            "2",
            "333-444",
            "Widget B",
            "1",
            "$2.00 $2.00",
            "Total",
        ]);
        assert_eq!(parsed.items_processed, parsed.items.len());
    }
}
