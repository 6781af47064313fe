//! Storage layer for PFIM
//!
//! [`EntryStore`] is the persistence port the ledger service talks to.
//! [`SqliteStore`] is the on-disk implementation; [`MemoryStore`] evaluates
//! descriptors in memory and backs the service tests.

pub mod memory;
pub mod sql;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::{PfimError, PfimResult};
use crate::models::{Entry, EntryId, StoredEntry};
use crate::query::{Operation, QueryDescriptor, Replacement};

/// Persistence port for entries
pub trait EntryStore {
    /// Insert an entry and return the id it was given
    fn add_entry(&self, entry: &Entry) -> PfimResult<EntryId>;

    /// Stream the entries a FETCH descriptor selects, in its order, into `sink`
    ///
    /// Returns the number of entries delivered. An error from the sink stops
    /// the fetch and is returned as is.
    fn fetch(
        &self,
        descriptor: &QueryDescriptor,
        sink: &mut dyn FnMut(StoredEntry) -> PfimResult<()>,
    ) -> PfimResult<usize>;

    /// Apply `replacement` to every entry an UPDATE descriptor selects
    fn update(&self, descriptor: &QueryDescriptor, replacement: &Replacement)
        -> PfimResult<usize>;

    /// Remove every entry a DELETE descriptor selects
    fn delete(&self, descriptor: &QueryDescriptor) -> PfimResult<usize>;

    /// Collect a fetch into a vector
    fn fetch_all(&self, descriptor: &QueryDescriptor) -> PfimResult<Vec<StoredEntry>> {
        let mut entries = Vec::new();
        self.fetch(descriptor, &mut |entry| {
            entries.push(entry);
            Ok(())
        })?;
        Ok(entries)
    }
}

/// Reject a descriptor built for a different operation
pub(crate) fn expect_operation(
    descriptor: &QueryDescriptor,
    expected: Operation,
) -> PfimResult<()> {
    if descriptor.operation != expected {
        return Err(PfimError::Storage(format!(
            "Expected a {} descriptor, got {}",
            expected, descriptor.operation
        )));
    }
    Ok(())
}

/// Check an entry before it is written
pub(crate) fn check_entry(entry: &Entry) -> PfimResult<()> {
    entry
        .validate()
        .map_err(|e| PfimError::Validation(e.to_string()))
}
