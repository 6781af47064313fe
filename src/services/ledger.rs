//! Ledger service
//!
//! Runs the four user operations end to end: build the descriptor from the
//! raw options, hand it to the store, audit the mutation.

use tracing::{debug, info, warn};

use crate::audit::{AuditLogger, AuditRecord};
use crate::error::PfimResult;
use crate::models::StoredEntry;
use crate::query::{DeleteOptions, FetchOptions, QueryBuilder, RecordOptions, UpdateOptions};
use crate::reports::EntryReport;
use crate::storage::EntryStore;

/// Service for recording, reporting, updating and deleting entries
pub struct LedgerService<'a> {
    store: &'a dyn EntryStore,
    builder: QueryBuilder,
    audit: Option<AuditLogger>,
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service
    pub fn new(store: &'a dyn EntryStore, builder: QueryBuilder) -> Self {
        Self {
            store,
            builder,
            audit: None,
        }
    }

    /// Append a record of every mutation to `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    fn log_audit(&self, record: AuditRecord) -> PfimResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&record),
            None => Ok(()),
        }
    }

    /// Record a new entry
    pub fn record(&self, opts: &RecordOptions) -> PfimResult<StoredEntry> {
        let entry = self.builder.build_record(opts)?;
        let id = self.store.add_entry(&entry)?;
        info!(%id, %entry, "recorded entry");

        self.log_audit(AuditRecord::created(id, &entry))?;

        Ok(StoredEntry::new(id, entry))
    }

    /// Fetch entries and summarize them
    pub fn report(&self, opts: &FetchOptions) -> PfimResult<EntryReport> {
        let descriptor = self.builder.build_fetch(opts)?;
        let report = EntryReport::generate(self.store, &descriptor)?;
        debug!(
            predicate = %descriptor.predicate,
            rows = report.entries.len(),
            "built report"
        );
        Ok(report)
    }

    /// Replace a field on every matching entry; returns the number changed
    pub fn update(&self, opts: &UpdateOptions) -> PfimResult<usize> {
        let plan = self.builder.build_update(opts)?;
        let rows = self.store.update(&plan.descriptor, &plan.replacement)?;

        if rows == 0 {
            warn!(predicate = %plan.descriptor.predicate, "update matched no entries");
        } else {
            info!(
                predicate = %plan.descriptor.predicate,
                change = %plan.replacement,
                rows,
                "updated entries"
            );
        }

        self.log_audit(AuditRecord::updated(&plan, rows))?;

        Ok(rows)
    }

    /// Remove every matching entry; returns the number removed
    pub fn delete(&self, opts: &DeleteOptions) -> PfimResult<usize> {
        let descriptor = self.builder.build_delete(opts)?;
        let rows = self.store.delete(&descriptor)?;

        if rows == 0 {
            warn!(predicate = %descriptor.predicate, "delete matched no entries");
        } else {
            info!(predicate = %descriptor.predicate, rows, "deleted entries");
        }

        self.log_audit(AuditRecord::deleted(&descriptor, rows))?;

        Ok(rows)
    }
}
