//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    /// A compensating write that undid part of a failed mutation
    Revert,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Revert => write!(f, "REVERT"),
        }
    }
}

/// Kinds of rows that get audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Transaction,
    LedgerEntry,
    /// Both legs of a transfer, logged together
    Transfer,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Transaction => write!(f, "Transaction"),
            EntityType::LedgerEntry => write!(f, "LedgerEntry"),
            EntityType::Transfer => write!(f, "Transfer"),
        }
    }
}

/// One line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    pub entity_id: String,

    /// Short description, e.g. "Foods" or "rekening -> dana"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn new(
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            after: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Create, entity_type, entity_id, entity_name)
        }
    }

    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
            ..Self::new(Operation::Update, entity_type, entity_id, entity_name)
        }
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            before: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Delete, entity_type, entity_id, entity_name)
        }
    }

    /// Record a compensating write and the reason it was needed
    pub fn revert<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        reason: impl Into<String>,
        entity: &T,
    ) -> Self {
        Self {
            before: serde_json::to_value(entity).ok(),
            diff_summary: Some(reason.into()),
            ..Self::new(Operation::Revert, entity_type, entity_id, None)
        }
    }

    /// One or two lines for `balance history`
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_entry_has_only_after() {
        let entry = AuditEntry::create(
            EntityType::Transaction,
            "txn-1234abcd",
            Some("Foods".into()),
            &json!({"price": 25000}),
        );
        assert_eq!(entry.operation, Operation::Create);
        assert!(entry.before.is_none());
        assert_eq!(entry.after, Some(json!({"price": 25000})));
    }

    #[test]
    fn test_revert_entry() {
        let entry = AuditEntry::revert(
            EntityType::Transaction,
            "txn-1234abcd",
            "ledger insert failed",
            &json!({"price": 25000}),
        );
        assert_eq!(entry.operation, Operation::Revert);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
        assert!(entry.format_human_readable().contains("ledger insert failed"));
    }

    #[test]
    fn test_entity_type_wire_name() {
        let json = serde_json::to_string(&EntityType::LedgerEntry).unwrap();
        assert_eq!(json, "\"ledger_entry\"");
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::delete(
            EntityType::Transaction,
            "txn-1234abcd",
            Some("Transportation".into()),
            &json!({}),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("DELETE"));
        assert!(formatted.contains("Transaction"));
        assert!(formatted.contains("txn-1234abcd"));
        assert!(formatted.contains("(Transportation)"));
    }
}
