//! Audit entry data structures
//!
//! Defines the operations recorded in the audit log and the entry format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Expense;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Expense was added
    Create,
    /// Expense was edited in place
    Update,
    /// Expense was removed
    Delete,
    /// Ledger was replaced from a CSV file
    Load,
    /// Ledger was written to a CSV file
    Save,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Load => write!(f, "LOAD"),
            Operation::Save => write!(f, "SAVE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Ledger row affected, 0-based
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,

    /// The record before the operation (updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// The record after the operation (creates/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable diff or file details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    fn blank(operation: Operation) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            row: None,
            before: None,
            after: None,
            detail: None,
        }
    }

    /// Entry for an added expense
    pub fn create(row: usize, expense: &Expense) -> Self {
        Self {
            row: Some(row),
            after: serde_json::to_value(expense).ok(),
            ..Self::blank(Operation::Create)
        }
    }

    /// Entry for an edited expense
    pub fn update(row: usize, before: &Expense, after: &Expense, diff: Option<String>) -> Self {
        Self {
            row: Some(row),
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            detail: diff,
            ..Self::blank(Operation::Update)
        }
    }

    /// Entry for a removed expense
    pub fn delete(row: usize, expense: &Expense) -> Self {
        Self {
            row: Some(row),
            before: serde_json::to_value(expense).ok(),
            ..Self::blank(Operation::Delete)
        }
    }

    /// Entry for a whole-ledger file operation (load or save)
    pub fn file(operation: Operation, detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..Self::blank(operation)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation
        );

        if let Some(row) = self.row {
            output.push_str(&format!(" row {}", row + 1));
        }

        if let Some(record) = self.after.as_ref().or(self.before.as_ref()) {
            if let Ok(expense) = serde_json::from_value::<Expense>(record.clone()) {
                output.push_str(&format!(" ({})", expense));
            }
        }

        if let Some(detail) = &self.detail {
            let label = match self.operation {
                Operation::Update => "Changes",
                _ => "Detail",
            };
            output.push_str(&format!("\n  {}: {}", label, detail));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn lunch() -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            "Food",
            Money::from_cents(500),
            "Lunch",
        )
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Load.to_string(), "LOAD");
        assert_eq!(Operation::Save.to_string(), "SAVE");
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(3, &lunch());

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.row, Some(3));
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_update_entry() {
        let mut after = lunch();
        after.amount = Money::from_cents(750);

        let entry = AuditEntry::update(0, &lunch(), &after, Some("amount: \"5.00\" -> \"7.50\"".into()));

        assert_eq!(entry.operation, Operation::Update);
        assert!(entry.before.is_some());
        assert!(entry.after.is_some());
        assert!(entry.detail.unwrap().contains("7.50"));
    }

    #[test]
    fn test_file_entry_has_no_row() {
        let entry = AuditEntry::file(Operation::Save, "/tmp/x.csv (2 rows)");
        let json = serde_json::to_string(&entry).unwrap();

        assert!(!json.contains("\"row\""));
        assert!(json.contains("\"operation\":\"save\""));
    }

    #[test]
    fn test_human_readable_format() {
        let formatted = AuditEntry::delete(1, &lunch()).format_human_readable();

        assert!(formatted.contains("DELETE row 2"));
        assert!(formatted.contains("2025-01-20 Food 5.00 (Lunch)"));
    }
}
