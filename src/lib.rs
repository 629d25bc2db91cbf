//! fintrack - command-line personal income and expense tracker
//!
//! Keeps a ledger of income and expense records in a plain comma-delimited
//! file, filters it by date range and summarizes it into a dashboard.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (records, money, ids)
//! - `storage`: Line codec and the in-memory ledger store
//! - `services`: Validation and the date-range filter
//! - `reports`: Dashboard aggregation
//! - `audit`: Audit logging system
//! - `export`: CSV and JSON export
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::config::{TrackerPaths, Settings};
//! use finance_tracker::reports::Summary;
//! use finance_tracker::storage::LedgerStore;
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let (store, _report) = LedgerStore::open(paths.transactions_file(), settings.date_format.clone())?;
//! let summary = Summary::for_store(&store, settings.recent_limit)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::TrackerError;
