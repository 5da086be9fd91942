//! CSV writer for parsed line-item records.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::Result;
use crate::models::line_item::LineItem;

/// Column header shared by per-document and combined tables.
///
/// Rev is reserved and always empty.
pub const COLUMNS: [&str; 8] = [
    "ORLN",
    "PartID",
    "Rev",
    "Description",
    "ShipQty",
    "UnitPrice",
    "Amount",
    "Filename",
];

/// Writes line items as CSV rows under the fixed column header.
pub struct RecordWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl RecordWriter<File> {
    /// Create a writer at the given path and emit the header row.
    pub fn create(path: &Path) -> Result<Self> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> RecordWriter<W> {
    /// Wrap a writer and emit the header row.
    pub fn from_writer(writer: W) -> Result<Self> {
        let mut inner = csv::Writer::from_writer(writer);
        inner.write_record(COLUMNS)?;
        Ok(Self { inner })
    }

    /// Write one record row for the item, then one row per note.
    ///
    /// Unset fields become empty columns. Note rows populate only the
    /// Description and Filename columns.
    pub fn write_item(&mut self, item: &LineItem, filename: &str) -> Result<()> {
        self.inner.write_record([
            item.order_line.to_string().as_str(),
            item.part_id.as_deref().unwrap_or(""),
            "",
            item.description.as_deref().unwrap_or(""),
            item.ship_qty.as_deref().unwrap_or(""),
            item.unit_price.as_deref().unwrap_or(""),
            item.amount.as_deref().unwrap_or(""),
            filename,
        ])?;

        for note in &item.notes {
            self.inner
                .write_record(["", "", "", note.as_str(), "", "", "", filename])?;
        }

        Ok(())
    }

    /// Flush buffered rows to the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
