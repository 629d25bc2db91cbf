//! Export module for the finance tracker
//!
//! - CSV: quoted, spreadsheet-compatible transaction list
//! - JSON: transactions plus dashboard totals

pub mod csv;
pub mod json;

pub use self::csv::export_transactions_csv;
pub use self::json::{export_ledger_json, LedgerExport, EXPORT_SCHEMA_VERSION};
