//! CSV Export functionality
//!
//! Unlike the ledger file, the export has a header row and quotes fields as
//! needed, so commas in any field survive and spreadsheets can open it.

use std::io::Write;

use crate::error::TrackerResult;
use crate::storage::LedgerStore;

/// Export the visible transactions to CSV
pub fn export_transactions_csv<W: Write>(store: &LedgerStore, writer: W) -> TrackerResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["Date", "Description", "Category", "Type", "Amount", "Notes"])?;

    let mut count = 0;
    for entry in store.visible() {
        let record = &entry.record;
        csv_writer.write_record([
            record.date.as_str(),
            record.description.as_str(),
            record.category.as_str(),
            record.kind.as_str(),
            record.amount.as_str(),
            record.notes.as_str(),
        ])?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}
