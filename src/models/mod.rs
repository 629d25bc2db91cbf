//! Core data models for the finance tracker
//!
//! This module contains the data structures that represent the ledger
//! domain: transaction records, their kind, amounts and identifiers.

pub mod ids;
pub mod money;
pub mod transaction;

pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use transaction::{
    parse_date, Kind, Record, UnknownKind, DEFAULT_CATEGORIES, DEFAULT_CATEGORY,
};
