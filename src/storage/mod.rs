//! Storage layer for the finance tracker
//!
//! The ledger lives in a single flat file with one record per line, read in
//! full when a session starts and rewritten in full when it ends.

pub mod codec;
pub mod file_io;
pub mod ledger;

pub use codec::ParseFailure;
pub use file_io::{read_lines, write_lines_atomic};
pub use ledger::{load_records, save_records, LedgerEntry, LedgerStore, LoadReport, SkippedLine};
