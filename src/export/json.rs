//! JSON Export functionality
//!
//! Exports the visible transactions together with their dashboard summary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::Record;
use crate::reports::Summary;
use crate::storage::LedgerStore;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Application version that created the export
    pub app_version: String,
    /// Date range applied, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<ExportFilter>,
    pub transactions: Vec<Record>,
    pub summary: ExportSummary,
}

/// Bounds of the applied range; an open side is omitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

/// Dashboard totals with amounts in their two-decimal text form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSummary {
    pub total_income: String,
    pub total_expenses: String,
    pub net_balance: String,
    /// (category, total) in first-seen order
    pub category_totals: Vec<(String, String)>,
}

impl LedgerExport {
    /// Build an export of the store's visible records
    pub fn from_store(store: &LedgerStore) -> TrackerResult<Self> {
        let transactions: Vec<Record> = store.visible().map(|e| e.record.clone()).collect();
        let summary = Summary::generate(&transactions, 0)?;

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            filter: store.active_filter().map(|range| ExportFilter {
                start: range.start(),
                end: range.end(),
            }),
            transactions,
            summary: ExportSummary {
                total_income: summary.total_income.to_fixed(),
                total_expenses: summary.total_expenses.to_fixed(),
                net_balance: summary.net_balance.to_fixed(),
                category_totals: summary
                    .category_totals
                    .into_iter()
                    .map(|c| (c.category, c.total.to_fixed()))
                    .collect(),
            },
        })
    }
}

/// Write the export as JSON
pub fn export_ledger_json<W: Write>(store: &LedgerStore, writer: W, pretty: bool) -> TrackerResult<usize> {
    let export = LedgerExport::from_store(store)?;

    let written = if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    };
    written.map_err(|e| TrackerError::Export(format!("Failed to write JSON: {}", e)))?;

    Ok(export.transactions.len())
}
