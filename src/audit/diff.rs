//! Diff generation for audit logging
//!
//! Produces the human-readable change summary stored with update entries.

use crate::models::Record;

const MAX_VALUE_LEN: usize = 50;

/// Describe the fields that differ between two versions of a record
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Record, after: &Record) -> Option<String> {
    let fields = [
        ("date", before.date.as_str(), after.date.as_str()),
        ("description", before.description.as_str(), after.description.as_str()),
        ("category", before.category.as_str(), after.category.as_str()),
        ("kind", before.kind.as_str(), after.kind.as_str()),
        ("amount", before.amount.as_str(), after.amount.as_str()),
        ("notes", before.notes.as_str(), after.notes.as_str()),
    ];

    let changes: Vec<String> = fields
        .iter()
        .filter(|(_, old, new)| old != new)
        .map(|(name, old, new)| format!("{}: {} -> {}", name, format_value(old), format_value(new)))
        .collect();

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

/// Quote a value, truncating long text
fn format_value(value: &str) -> String {
    if value.chars().count() > MAX_VALUE_LEN {
        let cut: String = value.chars().take(MAX_VALUE_LEN - 3).collect();
        format!("\"{}...\"", cut)
    } else {
        format!("\"{}\"", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Kind;

    fn record() -> Record {
        Record {
            date: "2025-01-01".into(),
            description: "Bus pass".into(),
            category: "Transport".into(),
            kind: Kind::Expense,
            amount: "45.00".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_no_changes() {
        assert_eq!(generate_diff(&record(), &record()), None);
    }

    #[test]
    fn test_single_change() {
        let mut after = record();
        after.amount = "50.00".into();
        assert_eq!(
            generate_diff(&record(), &after),
            Some("amount: \"45.00\" -> \"50.00\"".to_string())
        );
    }

    #[test]
    fn test_multiple_changes_in_field_order() {
        let mut after = record();
        after.notes = "monthly".into();
        after.kind = Kind::Income;
        assert_eq!(
            generate_diff(&record(), &after),
            Some("kind: \"Expense\" -> \"Income\", notes: \"\" -> \"monthly\"".to_string())
        );
    }

    #[test]
    fn test_long_value_truncation() {
        let mut after = record();
        after.notes = "x".repeat(80);
        let diff = generate_diff(&record(), &after).unwrap();
        assert!(diff.contains("...\""));
        assert!(diff.len() < 80);
    }
}
