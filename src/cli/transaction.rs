//! CLI commands for transaction management
//!
//! Rows are addressed by the 1-based number shown in `list`.

use chrono::{Local, NaiveDate};
use clap::{Subcommand, ValueEnum};

use crate::audit::AuditLogger;
use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_grid};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Kind, TransactionId};
use crate::services::{CreateTransactionInput, TransactionService, UpdateTransactionInput};
use crate::storage::LedgerStore;

use super::{apply_date_bounds, parse_date_arg};

/// Transaction type as typed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for Kind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Income => Kind::Income,
            KindArg::Expense => Kind::Expense,
        }
    }
}

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// What the money was for
        description: String,
        /// Amount as a positive decimal (e.g. 12.50)
        amount: String,
        /// Category (defaults to Groceries)
        #[arg(short, long)]
        category: Option<String>,
        /// Income or expense
        #[arg(short = 't', long = "type", value_enum, default_value = "expense")]
        kind: KindArg,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List transactions
    List {
        /// Only show transactions on or after this date
        #[arg(long)]
        from: Option<String>,
        /// Only show transactions on or before this date
        #[arg(long)]
        to: Option<String>,
    },

    /// Show transaction details
    Show {
        /// Row number from `list`
        row: usize,
    },

    /// Edit a transaction
    Edit {
        /// Row number from `list`
        row: usize,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<KindArg>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Row number from `list`
        row: usize,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    store: &mut LedgerStore,
    settings: &Settings,
    audit: Option<&AuditLogger>,
    cmd: TransactionCommands,
) -> TrackerResult<()> {
    let currency = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            description,
            amount,
            category,
            kind,
            date,
            notes,
        } => {
            let date = match date {
                Some(text) => parse_date_arg(&text, &settings.date_format)?,
                None => Local::now().date_naive(),
            };

            let input = CreateTransactionInput {
                date,
                description,
                category: category.unwrap_or_default(),
                kind: kind.into(),
                amount,
                notes: notes.unwrap_or_default(),
            };

            let id = service(store, audit).create(input)?;
            let row = row_of(store, id)?;
            let record = &store.entries()[row - 1].record;

            println!("Added transaction #{}:", row);
            println!("  Date:        {}", record.date);
            println!("  Description: {}", record.description);
            println!("  Category:    {}", record.category);
            println!("  Type:        {}", record.kind);
            println!("  Amount:      {}{}", currency, record.amount);
        }

        TransactionCommands::List { from, to } => {
            apply_date_bounds(store, from.as_deref(), to.as_deref(), &settings.date_format)?;
            print!("{}", format_transaction_grid(store, currency));

            if store.active_filter().is_some() {
                println!(
                    "\nShowing {} of {} transactions",
                    store.visible_count(),
                    store.len()
                );
            }
        }

        TransactionCommands::Show { row } => {
            let id = id_for_row(store, row)?;
            let entry = store
                .get(id)
                .ok_or_else(|| TrackerError::transaction_not_found(row.to_string()))?;
            print!("{}", format_transaction_details(row, entry, currency));
        }

        TransactionCommands::Edit {
            row,
            date,
            description,
            category,
            kind,
            amount,
            notes,
        } => {
            let id = id_for_row(store, row)?;

            let date: Option<NaiveDate> = date
                .map(|text| parse_date_arg(&text, &settings.date_format))
                .transpose()?;

            let input = UpdateTransactionInput {
                date,
                description,
                category,
                kind: kind.map(Kind::from),
                amount,
                notes,
            };

            if input.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service(store, audit).update(id, input)?;
            println!("Updated transaction #{}: {}", row, updated.description);
        }

        TransactionCommands::Delete { row, force } => {
            let id = id_for_row(store, row)?;

            if !force {
                if let Some(entry) = store.get(id) {
                    println!("About to delete transaction #{}:", row);
                    print!("{}", format_transaction_details(row, entry, currency));
                    println!();
                    println!("Use --force to confirm deletion");
                }
                return Ok(());
            }

            let removed = service(store, audit).delete(id)?;
            println!(
                "Deleted transaction #{}: {} ({}{})",
                row, removed.record.description, currency, removed.record.amount
            );
        }
    }

    Ok(())
}

fn service<'a>(store: &'a mut LedgerStore, audit: Option<&'a AuditLogger>) -> TransactionService<'a> {
    let service = TransactionService::new(store);
    match audit {
        Some(logger) => service.with_audit(logger),
        None => service,
    }
}

/// Translate a 1-based row number to the record's id
fn id_for_row(store: &LedgerStore, row: usize) -> TrackerResult<TransactionId> {
    if row == 0 {
        return Err(TrackerError::Validation("Row numbers start at 1".into()));
    }
    store.id_at(row - 1)
}

fn row_of(store: &LedgerStore, id: TransactionId) -> TrackerResult<usize> {
    store
        .position(id)
        .map(|index| index + 1)
        .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))
}
