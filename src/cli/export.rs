//! CLI command for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::export::{export_ledger_json, export_transactions_csv};
use crate::storage::LedgerStore;

use super::apply_date_bounds;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV with a header row (transactions only)
    Csv,
    /// JSON with transactions and dashboard totals
    Json,
}

/// Export options
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// Output file path (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[arg(long)]
    pub from: Option<String>,

    #[arg(long)]
    pub to: Option<String>,
}

/// Handle export
pub fn handle_export_command(
    store: &mut LedgerStore,
    settings: &Settings,
    args: ExportArgs,
) -> TrackerResult<()> {
    apply_date_bounds(store, args.from.as_deref(), args.to.as_deref(), &settings.date_format)?;

    match &args.output {
        Some(output) => {
            let file = File::create(output).map_err(|e| {
                TrackerError::Export(format!(
                    "Failed to create file {}: {}",
                    output.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);
            let count = write_export(store, &mut writer, args.format, args.pretty)?;
            writer.flush()?;
            println!("Exported {} transactions to: {}", count, output.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(store, &mut writer, args.format, args.pretty)?;
            if args.format == ExportFormat::Json {
                writeln!(writer)?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    store: &LedgerStore,
    writer: &mut W,
    format: ExportFormat,
    pretty: bool,
) -> TrackerResult<usize> {
    match format {
        ExportFormat::Csv => export_transactions_csv(store, writer),
        ExportFormat::Json => export_ledger_json(store, writer, pretty),
    }
}
