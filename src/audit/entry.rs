//! Audit record data structures
//!
//! One record per mutation: which action, what it targeted and how many rows
//! it touched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Entry, EntryId};
use crate::query::{QueryDescriptor, UpdatePlan};

/// Mutations that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// An entry was recorded
    Create,
    /// Entries matching a predicate were changed
    Update,
    /// Entries matching a predicate were removed
    Delete,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditAction::Create => write!(f, "CREATE"),
            AuditAction::Update => write!(f, "UPDATE"),
            AuditAction::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// When the mutation happened (UTC)
    pub timestamp: DateTime<Utc>,

    pub action: AuditAction,

    /// Readable target: the new entry, or the predicate of a bulk change
    pub target: String,

    /// Rows inserted, changed or removed
    pub rows: usize,

    /// Id given to a created entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<i64>,

    /// JSON form of the created entry or of the descriptor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,

    /// Readable replacement of an update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,
}

impl AuditRecord {
    /// Record for a newly inserted entry
    pub fn created(id: EntryId, entry: &Entry) -> Self {
        Self {
            timestamp: Utc::now(),
            action: AuditAction::Create,
            target: entry.to_string(),
            rows: 1,
            entry_id: Some(id.get()),
            details: serde_json::to_value(entry).ok(),
            change: None,
        }
    }

    /// Record for a bulk update
    pub fn updated(plan: &UpdatePlan, rows: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            action: AuditAction::Update,
            target: plan.descriptor.predicate.to_string(),
            rows,
            entry_id: None,
            details: serde_json::to_value(plan).ok(),
            change: Some(plan.replacement.to_string()),
        }
    }

    /// Record for a bulk delete
    pub fn deleted(descriptor: &QueryDescriptor, rows: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            action: AuditAction::Delete,
            target: descriptor.predicate.to_string(),
            rows,
            entry_id: None,
            details: serde_json::to_value(descriptor).ok(),
            change: None,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;
    use crate::query::{Clause, Operation, Predicate, Replacement};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
    }

    #[test]
    fn test_action_display() {
        assert_eq!(AuditAction::Create.to_string(), "CREATE");
        assert_eq!(AuditAction::Update.to_string(), "UPDATE");
        assert_eq!(AuditAction::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_created_record() {
        let entry = Entry::spent(date(), "OUT", "Cinema", Amount::from_cents(7500));
        let record = AuditRecord::created(EntryId::new(4), &entry);

        assert_eq!(record.action, AuditAction::Create);
        assert_eq!(record.entry_id, Some(4));
        assert_eq!(record.rows, 1);
        assert_eq!(record.details.unwrap()["tag"], "OUT");
    }

    #[test]
    fn test_updated_record() {
        let plan = UpdatePlan {
            descriptor: QueryDescriptor::new(
                Operation::Update,
                Predicate::everything()
                    .and(Clause::On(date()))
                    .and(Clause::Tag("OUT".into())),
            ),
            replacement: Replacement::Tag("LEISURE".into()),
        };
        let record = AuditRecord::updated(&plan, 2);

        assert_eq!(record.target, "date = 2021-01-01 AND tag = 'OUT'");
        assert_eq!(record.change.as_deref(), Some("tag := 'LEISURE'"));
        assert_eq!(record.rows, 2);
    }

    #[test]
    fn test_serialization() {
        let descriptor = QueryDescriptor::new(Operation::Delete, Predicate::everything());
        let record = AuditRecord::deleted(&descriptor, 0);

        let json = serde_json::to_string(&record).unwrap();
        let parsed: AuditRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.action, AuditAction::Delete);
        assert_eq!(parsed.target, "all entries");
        assert_eq!(parsed.rows, 0);
    }
}
