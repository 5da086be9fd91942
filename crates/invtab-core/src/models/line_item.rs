//! Parsed invoice line-item records.

use serde::{Deserialize, Serialize};

/// One parsed invoice line item.
///
/// Scalar fields are filled at most once while a document is parsed;
/// anything the heuristics never matched stays `None` and is emitted as
/// an empty column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Order line number (ORLN), sequential within a document.
    pub order_line: u64,

    /// Part identifier, a two-segment numeric token such as "123-456789".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_id: Option<String>,

    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Shipped quantity, kept verbatim as extracted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_qty: Option<String>,

    /// Unit price currency string, e.g. "$5.00".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<String>,

    /// Line amount currency string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    /// Shipping/backorder annotation lines, in input order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl LineItem {
    /// Create an empty item for the given order line number.
    pub fn new(order_line: u64) -> Self {
        Self {
            order_line,
            part_id: None,
            description: None,
            ship_qty: None,
            unit_price: None,
            amount: None,
            notes: Vec::new(),
        }
    }

    /// An item is complete once quantity, unit price and amount are all set.
    pub fn is_complete(&self) -> bool {
        self.ship_qty.is_some() && self.unit_price.is_some() && self.amount.is_some()
    }
}

/// Store a value into an optional field only if the field is still unset.
///
/// Returns whether the value was stored. Fields are never overwritten.
pub(crate) fn set_if_absent(slot: &mut Option<String>, value: &str) -> bool {
    if slot.is_none() {
        *slot = Some(value.to_string());
        true
    } else {
        false
    }
}
