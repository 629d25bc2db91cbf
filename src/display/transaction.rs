//! Transaction display formatting
//!
//! Renders the ledger as a numbered grid. Row numbers are 1-based ledger
//! positions and stay the same when a filter hides rows, so the number shown
//! is the one `edit` and `delete` accept.

use std::path::Path;

use crate::models::{Kind, Record};
use crate::storage::{LedgerEntry, LedgerStore, LoadReport, ParseFailure};

/// Display the stored amount with a symbol, or the raw text if unreadable
fn display_amount(record: &Record, currency: &str) -> String {
    match record.parsed_amount() {
        Ok(amount) => {
            let signed = if record.kind == Kind::Income { amount } else { -amount };
            signed.format_with_symbol(currency)
        }
        Err(_) => format!("?{}", record.amount),
    }
}

/// Format a single ledger row
pub fn format_transaction_row(row: usize, record: &Record, currency: &str) -> String {
    format!(
        "{:>4} {:<12} {:<24} {:<14} {:<8} {:>12} {}",
        row,
        record.date,
        truncate(&record.description, 24),
        truncate(&record.category, 14),
        record.kind,
        display_amount(record, currency),
        record.notes
    )
    .trim_end()
    .to_string()
}

/// Format the visible part of the ledger as a grid
pub fn format_transaction_grid(store: &LedgerStore, currency: &str) -> String {
    let rows: Vec<(usize, &LedgerEntry)> = store
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_visible())
        .map(|(i, e)| (i + 1, e))
        .collect();

    if rows.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4} {:<12} {:<24} {:<14} {:<8} {:>12} {}\n",
        "#", "Date", "Description", "Category", "Type", "Amount", "Notes"
    ));
    output.push_str(&"-".repeat(84));
    output.push('\n');

    for (row, entry) in rows {
        output.push_str(&format_transaction_row(row, &entry.record, currency));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(row: usize, entry: &LedgerEntry, currency: &str) -> String {
    let record = &entry.record;
    let mut output = String::new();

    output.push_str(&format!("Row:         {}\n", row));
    output.push_str(&format!("Session ID:  {}\n", entry.id));
    output.push_str(&format!("Date:        {}\n", record.date));
    output.push_str(&format!("Description: {}\n", record.description));
    output.push_str(&format!("Category:    {}\n", record.category));
    output.push_str(&format!("Type:        {}\n", record.kind));
    output.push_str(&format!("Amount:      {}\n", display_amount(record, currency)));

    if !record.notes.is_empty() {
        output.push_str(&format!("Notes:       {}\n", record.notes));
    }

    output
}

/// Describe lines that were skipped while loading from `path`
pub fn format_load_warnings(report: &LoadReport, path: &Path) -> String {
    let mut output = String::new();
    for skipped in &report.skipped {
        output.push_str(&format!(
            "warning: skipped line {} ({}): {}\n",
            skipped.line_number,
            skipped.reason,
            truncate(&skipped.line, 60)
        ));
        if let ParseFailure::UnknownKind(label) = &skipped.reason {
            output.push_str(&format!(
                "  hint: change '{}' to Income or Expense on line {} of {} to keep this record\n",
                label,
                skipped.line_number,
                path.display()
            ));
        }
    }
    if report.has_skipped() {
        output.push_str(&format!(
            "warning: {} unreadable line(s) will be dropped the next time the ledger is saved\n",
            report.skipped.len()
        ));
    }
    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::services::DateRange;
    use crate::storage::SkippedLine;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(day: u32, description: &str, kind: Kind, cents: i64) -> Record {
        Record::new(
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            "%Y-%m-%d",
            description,
            "Salary",
            kind,
            Money::from_cents(cents),
            "",
        )
    }

    #[test]
    fn test_row_signs_amounts() {
        let income = format_transaction_row(1, &record(1, "Pay", Kind::Income, 250000), "$");
        let expense = format_transaction_row(2, &record(2, "Cake", Kind::Expense, 1200), "$");

        assert!(income.contains("$2500.00"));
        assert!(!income.contains("-$"));
        assert!(expense.contains("-$12.00"));
    }

    #[test]
    fn test_unreadable_amount_shown_raw() {
        let mut r = record(1, "Odd", Kind::Expense, 100);
        r.amount = "1,00".into();
        assert!(format_transaction_row(1, &r, "$").contains("?1,00"));
    }

    #[test]
    fn test_grid_keeps_ledger_row_numbers_under_filter() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = LedgerStore::new(temp_dir.path().join("t.csv"), "%Y-%m-%d");
        store.add(record(1, "early", Kind::Expense, 100)).unwrap();
        store.add(record(20, "late", Kind::Expense, 100)).unwrap();
        store
            .apply_filter(DateRange::new(
                NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            ))
            .unwrap();

        let grid = format_transaction_grid(&store, "$");
        assert!(!grid.contains("early"));
        let late_line = grid.lines().find(|l| l.contains("late")).unwrap();
        assert!(late_line.trim_start().starts_with('2'));
    }

    #[test]
    fn test_empty_grid() {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::new(temp_dir.path().join("t.csv"), "%Y-%m-%d");
        assert_eq!(format_transaction_grid(&store, "$"), "No transactions found.\n");
    }

    #[test]
    fn test_load_warnings() {
        let report = LoadReport {
            loaded: 3,
            skipped: vec![SkippedLine {
                line_number: 4,
                line: "a,b,c".into(),
                reason: ParseFailure::FieldCount { found: 3 },
            }],
        };
        let path = Path::new("ledger.csv");
        let text = format_load_warnings(&report, path);
        assert!(text.contains("skipped line 4 (expected 6 fields, found 3): a,b,c"));
        assert!(text.contains("1 unreadable line(s)"));
        assert!(!text.contains("hint"));

        assert_eq!(format_load_warnings(&LoadReport::default(), path), "");
    }

    #[test]
    fn test_unknown_kind_warning_suggests_fix() {
        let report = LoadReport {
            loaded: 0,
            skipped: vec![SkippedLine {
                line_number: 2,
                line: "2025-01-02,Tea,Groceries,Gift,3.00,".into(),
                reason: ParseFailure::UnknownKind("Gift".into()),
            }],
        };

        let text = format_load_warnings(&report, Path::new("ledger.csv"));
        assert!(text.contains("unknown kind 'Gift'"));
        assert!(text.contains("hint: change 'Gift' to Income or Expense on line 2 of ledger.csv"));
    }
}
