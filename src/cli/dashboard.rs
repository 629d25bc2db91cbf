//! CLI command for the dashboard summary

use clap::Args;

use crate::config::Settings;
use crate::error::TrackerResult;
use crate::reports::Summary;
use crate::storage::LedgerStore;

use super::apply_date_bounds;

/// Dashboard options
#[derive(Args, Debug, Default)]
pub struct DashboardArgs {
    /// Only count transactions on or after this date
    #[arg(long)]
    pub from: Option<String>,
    /// Only count transactions on or before this date
    #[arg(long)]
    pub to: Option<String>,
    /// Number of recent transactions to show (defaults to the configured limit)
    #[arg(short, long)]
    pub recent: Option<usize>,
}

/// Print totals, category breakdown and recent transactions
pub fn handle_dashboard_command(
    store: &mut LedgerStore,
    settings: &Settings,
    args: DashboardArgs,
) -> TrackerResult<()> {
    apply_date_bounds(store, args.from.as_deref(), args.to.as_deref(), &settings.date_format)?;

    let summary = Summary::for_store(store, args.recent.unwrap_or(settings.recent_limit))?;

    if let Some(range) = store.active_filter() {
        println!("Period: {}", range);
        println!();
    }
    print!("{}", summary.format_terminal(&settings.currency_symbol));

    Ok(())
}
