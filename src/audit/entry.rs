//! Audit entry data structures
//!
//! Defines the operation types and the entry format written to the audit log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Record, TransactionId};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Transaction was added
    Create,
    /// Transaction was edited
    Update,
    /// Transaction was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
///
/// Transaction ids are session-scoped, so the description is kept alongside
/// to make entries readable across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub transaction_id: String,

    /// Description of the affected transaction
    pub description: String,

    /// The record before the operation (updates and deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Record>,

    /// The record after the operation (creates and updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Record>,

    /// Human-readable diff summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Create a new audit entry for a create operation
    pub fn create(id: TransactionId, record: &Record) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            transaction_id: id.to_string(),
            description: record.description.clone(),
            before: None,
            after: Some(record.clone()),
            diff_summary: None,
        }
    }

    /// Create a new audit entry for an update operation
    pub fn update(
        id: TransactionId,
        before: &Record,
        after: &Record,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            transaction_id: id.to_string(),
            description: after.description.clone(),
            before: Some(before.clone()),
            after: Some(after.clone()),
            diff_summary,
        }
    }

    /// Create a new audit entry for a delete operation
    pub fn delete(id: TransactionId, record: &Record) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            transaction_id: id.to_string(),
            description: record.description.clone(),
            before: Some(record.clone()),
            after: None,
            diff_summary: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.transaction_id,
            self.description
        );

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Kind;

    fn record(amount: &str) -> Record {
        Record {
            date: "2025-01-01".into(),
            description: "Cinema".into(),
            category: "Entertainment".into(),
            kind: Kind::Expense,
            amount: amount.into(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_create_entry() {
        let id = TransactionId::new();
        let entry = AuditEntry::create(id, &record("12.00"));

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.transaction_id, id.to_string());
        assert!(entry.before.is_none());
        assert_eq!(entry.after, Some(record("12.00")));
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(TransactionId::new(), &record("12.00"));

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::update(
            TransactionId::new(),
            &record("12.00"),
            &record("14.00"),
            Some("amount: \"12.00\" -> \"14.00\"".into()),
        );

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.operation, Operation::Update);
        assert_eq!(deserialized.after.unwrap().amount, "14.00");
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::update(
            TransactionId::new(),
            &record("12.00"),
            &record("14.00"),
            Some("amount: \"12.00\" -> \"14.00\"".into()),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("UPDATE"));
        assert!(formatted.contains("txn-"));
        assert!(formatted.contains("Cinema"));
        assert!(formatted.contains("Changes: amount"));
    }
}
