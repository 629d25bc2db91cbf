//! Transaction record model
//!
//! A record is the six persisted fields of one ledger line. The date and
//! amount are kept in their stored text form; they are only interpreted when
//! the filter or the dashboard needs them, so a damaged value surfaces as an
//! error at that point rather than silently disappearing on load.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use crate::error::{TrackerError, TrackerResult};

/// Categories offered by default. The list is advisory: any text is accepted.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Salary",
    "Groceries",
    "Rent",
    "Entertainment",
    "Utilities",
    "Transport",
];

/// Category preselected for new entries
pub const DEFAULT_CATEGORY: &str = "Groceries";

/// Formats tried, after the configured one, when reading a stored date
const FALLBACK_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Kind {
    Income,
    #[default]
    Expense,
}

impl Kind {
    /// The exact label written to the ledger file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a kind label is neither "Income" nor "Expense"
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown transaction kind: '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for Kind {
    type Err = UnknownKind;

    /// Stored labels must match exactly
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(Self::Income),
            "Expense" => Ok(Self::Expense),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// One transaction as it appears in the ledger file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Stored short date text
    pub date: String,
    pub description: String,
    pub category: String,
    pub kind: Kind,
    /// Stored amount text, two fraction digits
    pub amount: String,
    #[serde(default)]
    pub notes: String,
}

impl Record {
    /// Build a record from typed values, formatting the date and amount the
    /// way they are stored
    pub fn new(
        date: NaiveDate,
        date_format: &str,
        description: impl Into<String>,
        category: impl Into<String>,
        kind: Kind,
        amount: Money,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            date: date.format(date_format).to_string(),
            description: description.into(),
            category: category.into(),
            kind,
            amount: amount.to_fixed(),
            notes: notes.into(),
        }
    }

    /// Interpret the stored date
    pub fn parsed_date(&self, date_format: &str) -> TrackerResult<NaiveDate> {
        parse_date(&self.date, date_format)
    }

    /// Interpret the stored amount
    pub fn parsed_amount(&self) -> TrackerResult<Money> {
        Money::parse(&self.amount).map_err(|e| {
            TrackerError::Parse(format!(
                "Amount '{}' of '{}' is not a decimal: {}",
                self.amount, self.description, e
            ))
        })
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }
}

/// Parse a stored date, trying the configured format first
pub fn parse_date(text: &str, date_format: &str) -> TrackerResult<NaiveDate> {
    let text = text.trim();
    std::iter::once(date_format)
        .chain(FALLBACK_DATE_FORMATS)
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .ok_or_else(|| TrackerError::Parse(format!("Date '{}' is not a calendar date", text)))
}
