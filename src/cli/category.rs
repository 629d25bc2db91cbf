//! CLI command for listing categories

use crate::error::TrackerResult;
use crate::models::{DEFAULT_CATEGORIES, DEFAULT_CATEGORY};
use crate::storage::LedgerStore;

/// Categories in use, in first-seen ledger order, with their record counts
pub fn categories_in_use(store: &LedgerStore) -> Vec<(String, usize)> {
    let mut seen: Vec<(String, usize)> = Vec::new();
    for entry in store.entries() {
        match seen.iter_mut().find(|(name, _)| *name == entry.record.category) {
            Some((_, count)) => *count += 1,
            None => seen.push((entry.record.category.clone(), 1)),
        }
    }
    seen
}

/// Print the suggested categories and the ones the ledger actually uses
pub fn handle_categories_command(store: &LedgerStore) -> TrackerResult<()> {
    println!("Suggested categories:");
    for name in DEFAULT_CATEGORIES {
        let marker = if name == DEFAULT_CATEGORY { " (default)" } else { "" };
        println!("  {}{}", name, marker);
    }

    let in_use = categories_in_use(store);
    if !in_use.is_empty() {
        println!();
        println!("In use:");
        for (name, count) in in_use {
            println!("  {:<20} {:>5}", name, count);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Kind, Money, Record};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_categories_in_first_seen_order() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = LedgerStore::new(temp_dir.path().join("t.csv"), "%Y-%m-%d");
        for category in ["Rent", "Groceries", "Rent", "Pets"] {
            store
                .add(Record::new(
                    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                    "%Y-%m-%d",
                    "x",
                    category,
                    Kind::Expense,
                    Money::from_cents(100),
                    "",
                ))
                .unwrap();
        }

        assert_eq!(
            categories_in_use(&store),
            vec![
                ("Rent".to_string(), 2),
                ("Groceries".to_string(), 1),
                ("Pets".to_string(), 1)
            ]
        );
    }
}
