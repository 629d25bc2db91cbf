//! Reports for the finance tracker
//!
//! - Dashboard: income, expense and balance totals, expenses by category and
//!   the most recent transactions

pub mod dashboard;

pub use dashboard::{CategoryTotal, RecentTransaction, Summary, DEFAULT_RECENT_LIMIT};
