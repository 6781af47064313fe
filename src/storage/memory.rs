//! In-memory entry store
//!
//! Evaluates descriptors with [`Predicate::matches`](crate::query::Predicate::matches)
//! and [`SortSpec::apply`](crate::query::SortSpec::apply). Nothing is persisted.

use std::sync::RwLock;

use tracing::debug;

use crate::error::{PfimError, PfimResult};
use crate::models::{Entry, EntryId, StoredEntry};
use crate::query::{Operation, QueryDescriptor, Replacement};

use super::{check_entry, expect_operation, EntryStore};

#[derive(Debug, Default)]
struct MemoryData {
    entries: Vec<StoredEntry>,
    last_id: i64,
}

/// Entry store holding its rows in a vector
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<MemoryData>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> PfimResult<usize> {
        let data = self.data.read().map_err(|e| {
            PfimError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.entries.len())
    }

    pub fn is_empty(&self) -> PfimResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl EntryStore for MemoryStore {
    fn add_entry(&self, entry: &Entry) -> PfimResult<EntryId> {
        check_entry(entry)?;
        let mut data = self.data.write().map_err(|e| {
            PfimError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.last_id += 1;
        let id = EntryId::new(data.last_id);
        data.entries.push(StoredEntry::new(id, entry.clone()));
        debug!(%id, %entry, "inserted entry in memory");
        Ok(id)
    }

    fn fetch(
        &self,
        descriptor: &QueryDescriptor,
        sink: &mut dyn FnMut(StoredEntry) -> PfimResult<()>,
    ) -> PfimResult<usize> {
        expect_operation(descriptor, Operation::Fetch)?;

        // Release the lock before the sink runs so it may call back into the store
        let selected = {
            let data = self.data.read().map_err(|e| {
                PfimError::Storage(format!("Failed to acquire read lock: {}", e))
            })?;
            descriptor.apply(data.entries.iter().cloned())
        };

        let mut delivered = 0;
        for entry in selected {
            sink(entry)?;
            delivered += 1;
        }
        Ok(delivered)
    }

    fn update(&self, descriptor: &QueryDescriptor, replacement: &Replacement) -> PfimResult<usize> {
        expect_operation(descriptor, Operation::Update)?;
        let mut data = self.data.write().map_err(|e| {
            PfimError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut affected = 0;
        for stored in data
            .entries
            .iter_mut()
            .filter(|e| descriptor.predicate.matches(&e.entry))
        {
            replacement.apply(&mut stored.entry);
            affected += 1;
        }
        Ok(affected)
    }

    fn delete(&self, descriptor: &QueryDescriptor) -> PfimResult<usize> {
        expect_operation(descriptor, Operation::Delete)?;
        let mut data = self.data.write().map_err(|e| {
            PfimError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let before = data.entries.len();
        data.entries
            .retain(|e| !descriptor.predicate.matches(&e.entry));
        Ok(before - data.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;
    use crate::query::{Clause, Predicate};
    use chrono::NaiveDate;

    fn entry(day: u32, tag: &str, cents: u64) -> Entry {
        Entry::spent(
            NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            tag,
            "",
            Amount::from_cents(cents),
        )
    }

    #[test]
    fn test_add_and_fetch() {
        let store = MemoryStore::new();
        assert!(store.is_empty().unwrap());
        let first = store.add_entry(&entry(2, "B", 100)).unwrap();
        let second = store.add_entry(&entry(1, "A", 100)).unwrap();
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);

        let all = store
            .fetch_all(&QueryDescriptor::new(Operation::Fetch, Predicate::everything()))
            .unwrap();
        let tags: Vec<_> = all.iter().map(|e| e.entry.tag.as_str()).collect();
        assert_eq!(tags, vec!["B", "A"]);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        store.add_entry(&entry(1, "A", 100)).unwrap();
        store
            .delete(&QueryDescriptor::new(Operation::Delete, Predicate::everything()))
            .unwrap();
        let id = store.add_entry(&entry(1, "A", 100)).unwrap();
        assert_eq!(id.get(), 2);
    }

    #[test]
    fn test_update_is_bulk() {
        let store = MemoryStore::new();
        store.add_entry(&entry(1, "OUT", 100)).unwrap();
        store.add_entry(&entry(1, "OUT", 200)).unwrap();
        store.add_entry(&entry(2, "OUT", 300)).unwrap();

        let descriptor = QueryDescriptor::new(
            Operation::Update,
            Predicate::everything()
                .and(Clause::On(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()))
                .and(Clause::Tag("OUT".into())),
        );
        let affected = store
            .update(&descriptor, &Replacement::Tag("LEISURE".into()))
            .unwrap();
        assert_eq!(affected, 2);
        assert_eq!(store.len().unwrap(), 3);
    }

    #[test]
    fn test_rejects_invalid_entry() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.add_entry(&entry(1, "", 100)),
            Err(PfimError::Validation(_))
        ));
    }
}
