//! Transaction service
//!
//! Validates user input before it reaches the ledger and records every change
//! in the audit log. The ledger itself accepts whatever it is given; this is
//! the boundary where empty descriptions, non-positive amounts and text that
//! would break the stored line format are turned away.

use chrono::NaiveDate;

use crate::audit::{generate_diff, AuditEntry, AuditLogger};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Kind, Money, Record, TransactionId, DEFAULT_CATEGORY};
use crate::storage::codec::DELIMITER;
use crate::storage::{LedgerEntry, LedgerStore};

/// Input for adding a transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub date: NaiveDate,
    pub description: String,
    /// Empty means the default category
    pub category: String,
    pub kind: Kind,
    /// Amount as typed by the user
    pub amount: String,
    pub notes: String,
}

/// Field changes for an edit; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub kind: Option<Kind>,
    pub amount: Option<String>,
    pub notes: Option<String>,
}

impl UpdateTransactionInput {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.kind.is_none()
            && self.amount.is_none()
            && self.notes.is_none()
    }
}

/// Service for transaction management
pub struct TransactionService<'a> {
    store: &'a mut LedgerStore,
    audit: Option<&'a AuditLogger>,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(store: &'a mut LedgerStore) -> Self {
        Self { store, audit: None }
    }

    /// Record changes in the given audit log
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Validate and append a new transaction
    pub fn create(&mut self, input: CreateTransactionInput) -> TrackerResult<TransactionId> {
        let description = validate_description(&input.description)?;
        let category = validate_category(&input.category)?;
        let amount = validate_amount(&input.amount)?;
        validate_notes(&input.notes)?;

        let record = Record::new(
            input.date,
            self.store.date_format(),
            description,
            category,
            input.kind,
            amount,
            input.notes,
        );

        let id = self.store.add(record)?;
        if let Some(entry) = self.store.get(id) {
            self.audit(AuditEntry::create(id, &entry.record))?;
        }
        Ok(id)
    }

    /// Overwrite the fields of an existing transaction
    ///
    /// Only the supplied fields are validated; untouched fields keep their
    /// stored text exactly.
    pub fn update(&mut self, id: TransactionId, input: UpdateTransactionInput) -> TrackerResult<Record> {
        let current = self
            .store
            .get(id)
            .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))?
            .record
            .clone();

        let mut updated = current.clone();
        if let Some(date) = input.date {
            updated.date = date.format(self.store.date_format()).to_string();
        }
        if let Some(description) = &input.description {
            updated.description = validate_description(description)?;
        }
        if let Some(category) = &input.category {
            updated.category = validate_category(category)?;
        }
        if let Some(kind) = input.kind {
            updated.kind = kind;
        }
        if let Some(amount) = &input.amount {
            updated.amount = validate_amount(amount)?.to_fixed();
        }
        if let Some(notes) = input.notes {
            validate_notes(&notes)?;
            updated.notes = notes;
        }

        self.store.update_by_id(id, updated.clone())?;

        let diff = generate_diff(&current, &updated);
        self.audit(AuditEntry::update(id, &current, &updated, diff))?;
        Ok(updated)
    }

    /// Remove a transaction
    pub fn delete(&mut self, id: TransactionId) -> TrackerResult<LedgerEntry> {
        let removed = self.store.remove_by_id(id)?;
        self.audit(AuditEntry::delete(id, &removed.record))?;
        Ok(removed)
    }

    fn audit(&self, entry: AuditEntry) -> TrackerResult<()> {
        match self.audit {
            Some(logger) => logger.log(&entry),
            None => Ok(()),
        }
    }
}

fn validate_description(description: &str) -> TrackerResult<String> {
    let description = description.trim();
    if description.is_empty() {
        return Err(TrackerError::Validation("Description cannot be empty".into()));
    }
    reject_line_breaking("Description", description, true)?;
    Ok(description.to_string())
}

fn validate_category(category: &str) -> TrackerResult<String> {
    let category = category.trim();
    if category.is_empty() {
        return Ok(DEFAULT_CATEGORY.to_string());
    }
    reject_line_breaking("Category", category, true)?;
    Ok(category.to_string())
}

fn validate_notes(notes: &str) -> TrackerResult<()> {
    // Commas are allowed here; they are replaced when the line is written
    reject_line_breaking("Notes", notes, false)
}

/// Parse a user-entered amount, which must be a positive decimal
pub fn validate_amount(amount: &str) -> TrackerResult<Money> {
    let parsed = Money::parse(amount).map_err(|e| {
        TrackerError::Validation(format!(
            "Please enter a valid, positive amount ('{}': {})",
            amount.trim(),
            e
        ))
    })?;
    if !parsed.is_positive() {
        return Err(TrackerError::Validation(format!(
            "Please enter a valid, positive amount ('{}' is not greater than zero)",
            amount.trim()
        )));
    }
    Ok(parsed)
}

fn reject_line_breaking(field: &str, value: &str, reject_delimiter: bool) -> TrackerResult<()> {
    if value.contains(['\n', '\r']) {
        return Err(TrackerError::Validation(format!(
            "{} cannot contain line breaks",
            field
        )));
    }
    if reject_delimiter && value.contains(DELIMITER) {
        return Err(TrackerError::Validation(format!(
            "{} cannot contain '{}'",
            field, DELIMITER
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, LedgerStore, AuditLogger) {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::new(temp_dir.path().join("transactions.csv"), "%Y-%m-%d");
        let audit = AuditLogger::new(temp_dir.path().join("audit.log"));
        (temp_dir, store, audit)
    }

    fn input(description: &str, amount: &str) -> CreateTransactionInput {
        CreateTransactionInput {
            date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            description: description.into(),
            category: String::new(),
            kind: Kind::Expense,
            amount: amount.into(),
            notes: "split with flatmate, paid half".into(),
        }
    }

    #[test]
    fn test_create_formats_and_audits() {
        let (_temp, mut store, audit) = create_test_store();
        let id = TransactionService::new(&mut store)
            .with_audit(&audit)
            .create(input("  Groceries run ", "12.5"))
            .unwrap();

        let record = &store.get(id).unwrap().record;
        assert_eq!(record.description, "Groceries run");
        assert_eq!(record.category, DEFAULT_CATEGORY);
        assert_eq!(record.amount, "12.50");
        assert_eq!(record.date, "2025-04-01");

        let entries = audit.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let (_temp, mut store, _audit) = create_test_store();
        let mut service = TransactionService::new(&mut store);

        assert!(service.create(input("   ", "10")).unwrap_err().is_validation());
        assert!(service.create(input("Thing", "abc")).unwrap_err().is_validation());
        assert!(service.create(input("Thing", "0")).unwrap_err().is_validation());
        assert!(service.create(input("Thing", "-5")).unwrap_err().is_validation());
        assert!(service
            .create(input("Rent, March", "5"))
            .unwrap_err()
            .is_validation());

        let mut multiline = input("Thing", "5");
        multiline.notes = "line one\nline two".into();
        assert!(service.create(multiline).unwrap_err().is_validation());

        assert!(store.is_empty());
    }

    #[test]
    fn test_update_changes_only_given_fields() {
        let (_temp, mut store, audit) = create_test_store();
        let id = TransactionService::new(&mut store)
            .create(input("Bus", "2.40"))
            .unwrap();

        let updated = TransactionService::new(&mut store)
            .with_audit(&audit)
            .update(
                id,
                UpdateTransactionInput {
                    amount: Some("2.8".into()),
                    kind: Some(Kind::Expense),
                    category: Some("Transport".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.amount, "2.80");
        assert_eq!(updated.category, "Transport");
        assert_eq!(updated.description, "Bus");
        assert_eq!(store.get(id).unwrap().record, updated);

        let entries = audit.read_all().unwrap();
        assert_eq!(entries[0].operation, Operation::Update);
        let diff = entries[0].diff_summary.clone().unwrap();
        assert!(diff.contains("amount"));
        assert!(diff.contains("category"));
    }

    #[test]
    fn test_update_keeps_unreadable_stored_values() {
        let (_temp, mut store, _audit) = create_test_store();
        let mut damaged = Record::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            "%Y-%m-%d",
            "Old",
            "Misc",
            Kind::Expense,
            Money::from_cents(100),
            "",
        );
        damaged.date = "??".into();
        let id = store.add(damaged).unwrap();

        let updated = TransactionService::new(&mut store)
            .update(
                id,
                UpdateTransactionInput {
                    description: Some("Renamed".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.date, "??");
        assert_eq!(updated.description, "Renamed");
    }

    #[test]
    fn test_update_rejects_bad_amount_and_leaves_record() {
        let (_temp, mut store, _audit) = create_test_store();
        let id = TransactionService::new(&mut store)
            .create(input("Bus", "2.40"))
            .unwrap();

        let err = TransactionService::new(&mut store)
            .update(
                id,
                UpdateTransactionInput {
                    amount: Some("-1".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.get(id).unwrap().record.amount, "2.40");
    }

    #[test]
    fn test_delete_and_audit() {
        let (_temp, mut store, audit) = create_test_store();
        let mut service = TransactionService::new(&mut store).with_audit(&audit);
        let id = service.create(input("Film", "9.00")).unwrap();

        let removed = service.delete(id).unwrap();
        assert_eq!(removed.record.description, "Film");
        assert!(service.delete(id).unwrap_err().is_not_found());

        assert!(store.is_empty());
        let ops: Vec<_> = audit.read_all().unwrap().iter().map(|e| e.operation).collect();
        assert_eq!(ops, vec![Operation::Create, Operation::Delete]);
    }

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount("10.499").unwrap(), Money::from_cents(1050));
        assert!(validate_amount("0.001").is_err());
    }
}
