//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod dashboard;
pub mod export;
pub mod history;
pub mod transaction;

pub use category::handle_categories_command;
pub use dashboard::{handle_dashboard_command, DashboardArgs};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use history::handle_history_command;
pub use transaction::{handle_transaction_command, KindArg, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::models::parse_date;
use crate::services::DateRange;
use crate::storage::LedgerStore;

/// Parse a date typed on the command line
pub(crate) fn parse_date_arg(text: &str, date_format: &str) -> TrackerResult<NaiveDate> {
    parse_date(text, date_format).map_err(|_| {
        TrackerError::Validation(format!(
            "Invalid date format: '{}'. Use YYYY-MM-DD",
            text
        ))
    })
}

/// Apply `--from`/`--to` to the store; with neither given every row stays visible
pub(crate) fn apply_date_bounds(
    store: &mut LedgerStore,
    from: Option<&str>,
    to: Option<&str>,
    date_format: &str,
) -> TrackerResult<()> {
    let start = from.map(|text| parse_date_arg(text, date_format)).transpose()?;
    let end = to.map(|text| parse_date_arg(text, date_format)).transpose()?;

    match DateRange::from_bounds(start, end) {
        Some(range) => {
            let visible = store.apply_filter(range)?;
            tracing::debug!(visible, total = store.len(), "date filter applied");
        }
        None => store.clear_filter(),
    }
    Ok(())
}
