//! Service layer for the finance tracker
//!
//! The service layer sits between the CLI and the ledger store, handling
//! input validation, visibility filtering and audit logging.

pub mod filter;
pub mod transaction;

pub use filter::{is_visible, DateRange};
pub use transaction::{CreateTransactionInput, TransactionService, UpdateTransactionInput};
