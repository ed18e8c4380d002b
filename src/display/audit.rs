//! Audit log display

use crate::audit::AuditEntry;

/// One line per entry, oldest first
pub fn format_audit_entries(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "Audit log is empty.".to_string();
    }

    entries
        .iter()
        .map(AuditEntry::format_human_readable)
        .collect::<Vec<_>>()
        .join("\n")
}
