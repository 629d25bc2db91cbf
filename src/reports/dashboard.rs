//! Dashboard summary
//!
//! Totals, per-category expense breakdown and the most recent records, computed
//! over the records currently visible in the ledger.

use serde::Serialize;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Kind, Money, Record};
use crate::storage::LedgerStore;

/// Number of records in the recent list unless configured otherwise
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Width of the text bars drawn for charts
const BAR_WIDTH: usize = 30;

/// Summed expenses for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    /// Share of total expenses, 0-100
    pub percentage: f64,
}

/// One line of the recent list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentTransaction {
    pub date: String,
    pub description: String,
    pub category: String,
    pub kind: Kind,
    pub amount: Money,
}

/// Aggregated view of the visible records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub net_balance: Money,
    /// Expense totals in order of first appearance
    pub category_totals: Vec<CategoryTotal>,
    /// Most recently appended records first
    pub recent: Vec<RecentTransaction>,
    pub record_count: usize,
}

impl Summary {
    /// Summarize records given in ledger order
    ///
    /// Every amount is parsed; the first one that cannot be read aborts the
    /// whole summary, as does a total too large to represent.
    pub fn generate<'a, I>(records: I, recent_limit: usize) -> TrackerResult<Self>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let priced = records
            .into_iter()
            .map(|r| r.parsed_amount().map(|amount| (r, amount)))
            .collect::<TrackerResult<Vec<_>>>()?;

        let mut total_income = Money::zero();
        let mut total_expenses = Money::zero();
        let mut by_category: Vec<(String, Money)> = Vec::new();

        for (record, amount) in &priced {
            match record.kind {
                Kind::Income => total_income = accumulate(total_income, *amount)?,
                Kind::Expense => {
                    total_expenses = accumulate(total_expenses, *amount)?;
                    match by_category.iter_mut().find(|(c, _)| *c == record.category) {
                        Some((_, total)) => *total = accumulate(*total, *amount)?,
                        None => by_category.push((record.category.clone(), *amount)),
                    }
                }
            }
        }

        let category_totals = by_category
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                percentage: percentage_of(total, total_expenses),
                category,
                total,
            })
            .collect();

        let recent = priced
            .iter()
            .rev()
            .take(recent_limit)
            .map(|(record, amount)| RecentTransaction {
                date: record.date.clone(),
                description: record.description.clone(),
                category: record.category.clone(),
                kind: record.kind,
                amount: *amount,
            })
            .collect();

        let net_balance = total_income
            .checked_sub(total_expenses)
            .ok_or_else(|| out_of_range("net balance"))?;

        Ok(Self {
            total_income,
            total_expenses,
            net_balance,
            category_totals,
            recent,
            record_count: priced.len(),
        })
    }

    /// Summarize the visible records of a ledger
    pub fn for_store(store: &LedgerStore, recent_limit: usize) -> TrackerResult<Self> {
        Self::generate(store.visible().map(|e| &e.record), recent_limit)
    }

    /// Look up a category's expense total
    pub fn category_total(&self, category: &str) -> Option<Money> {
        self.category_totals
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.total)
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Dashboard\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total Income:   {:>14}\n",
            self.total_income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Total Expenses: {:>14}\n",
            self.total_expenses.format_with_symbol(currency)
        ));
        let standing = if self.net_balance.is_negative() {
            "deficit"
        } else {
            "surplus"
        };
        output.push_str(&format!(
            "Net Balance:    {:>14} ({})\n",
            self.net_balance.format_with_symbol(currency),
            standing
        ));
        output.push_str(&format!("Transactions:   {:>14}\n\n", self.record_count));

        output.push_str("Expenses by Category\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.category_totals.is_empty() {
            output.push_str("  (no expenses)\n");
        }
        for entry in &self.category_totals {
            output.push_str(&format!(
                "  {:<15} {:>12} {:>6.1}% {}\n",
                entry.category,
                entry.total.format_with_symbol(currency),
                entry.percentage,
                bar(entry.percentage)
            ));
        }

        output.push_str("\nIncome vs. Expenses\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        let larger = self.total_income.max(self.total_expenses);
        for (label, amount) in [
            ("Income", self.total_income),
            ("Expenses", self.total_expenses),
        ] {
            output.push_str(&format!(
                "  {:<15} {:>12} {}\n",
                label,
                amount.format_with_symbol(currency),
                bar(percentage_of(amount, larger))
            ));
        }

        output.push_str("\nRecent Transactions\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.recent.is_empty() {
            output.push_str("  (none)\n");
        }
        for txn in &self.recent {
            let signed = match txn.kind {
                Kind::Income => txn.amount,
                Kind::Expense => -txn.amount,
            };
            output.push_str(&format!(
                "  {:<12} {:<25} {:<8} {:>12}\n",
                txn.date,
                truncate(&txn.description, 25),
                txn.kind,
                signed.format_with_symbol(currency)
            ));
        }

        output
    }
}

fn accumulate(total: Money, amount: Money) -> TrackerResult<Money> {
    total
        .checked_add(amount)
        .ok_or_else(|| out_of_range("total"))
}

fn out_of_range(what: &str) -> TrackerError {
    TrackerError::Parse(format!("Amounts are too large to sum: {} out of range", what))
}

fn percentage_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        (part.cents() as f64 / whole.cents() as f64) * 100.0
    }
}

fn bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(filled.min(BAR_WIDTH))
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
