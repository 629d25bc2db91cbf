//! CLI command for viewing the audit log

use crate::audit::AuditLogger;
use crate::error::TrackerResult;

/// Print the most recent audit entries, oldest first
pub fn handle_history_command(audit: &AuditLogger, limit: usize) -> TrackerResult<()> {
    let entries = audit.read_recent(limit)?;

    if entries.is_empty() {
        println!("No history recorded.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
