//! Audit logging for ledger changes
//!
//! Records every add, edit and delete with before/after values in an
//! append-only audit log, independent of when the ledger itself is saved.
//!
//! - `AuditEntry`: one operation with timestamp and record snapshots.
//! - `AuditLogger`: writes entries as JSON lines.
//! - `generate_diff`: field-level change summary for edits.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Kind, Record, TransactionId};
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path);
        (logger, temp_dir)
    }

    fn record(description: &str) -> Record {
        Record {
            date: "2025-01-01".into(),
            description: description.into(),
            category: "Utilities".into(),
            kind: Kind::Expense,
            amount: "60.00".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();

        logger
            .log(&AuditEntry::create(TransactionId::new(), &record("Power")))
            .unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].description, "Power");
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();

        for i in 0..10 {
            let entry = AuditEntry::create(TransactionId::new(), &record(&format!("bill {}", i)));
            logger.log(&entry).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].description, "bill 7");
        assert_eq!(recent[2].description, "bill 9");
    }

    #[test]
    fn test_empty_log() {
        let (logger, temp) = create_test_logger();

        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
        assert!(!temp.path().join("audit.log").exists());
    }

    #[test]
    fn test_update_with_diff_logged() {
        let (logger, _temp) = create_test_logger();
        let before = record("Water");
        let mut after = record("Water");
        after.amount = "65.00".into();

        let entry = AuditEntry::update(
            TransactionId::new(),
            &before,
            &after,
            generate_diff(&before, &after),
        );
        logger.log(&entry).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries[0].operation, Operation::Update);
        assert_eq!(
            entries[0].diff_summary.as_deref(),
            Some("amount: \"60.00\" -> \"65.00\"")
        );
    }

    #[test]
    fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        logger
            .log(&AuditEntry::delete(TransactionId::new(), &record("Gas")))
            .unwrap();

        let logger2 = AuditLogger::new(temp.path().join("audit.log"));
        let entries = logger2.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Delete);
    }
}
