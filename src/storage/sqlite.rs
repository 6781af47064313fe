//! SQLite entry store
//!
//! One connection is opened per operation and dropped when the operation
//! returns, on success or failure.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::{params, params_from_iter, Connection, Row};
use tracing::debug;

use crate::error::{PfimError, PfimResult};
use crate::models::{Amount, Entry, EntryId, EntryKind, StoredEntry};
use crate::query::{Operation, QueryDescriptor, Replacement};

use super::sql::{self, date_value, ENTRY_COLUMNS};
use super::{check_entry, expect_operation, EntryStore};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        tag TEXT NOT NULL,
        kind TEXT NOT NULL CHECK (kind IN ('E', 'S')),
        description TEXT NOT NULL DEFAULT '',
        amount REAL NOT NULL CHECK (amount >= 0)
    );

    CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(date);
    CREATE INDEX IF NOT EXISTS idx_entries_tag ON entries(tag);
";

/// Entry store backed by a single SQLite file
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open the database at `path`, creating the file and schema if needed
    pub fn open(path: impl Into<PathBuf>) -> PfimResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                PfimError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let store = Self { path };
        let conn = store.connect()?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| PfimError::Storage(format!("Failed to create schema: {}", e)))?;
        debug!(path = %store.path.display(), "opened entry store");
        Ok(store)
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> PfimResult<Connection> {
        Connection::open(&self.path).map_err(|e| {
            PfimError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
        })
    }
}

fn row_to_entry(row: &Row<'_>) -> PfimResult<StoredEntry> {
    let id: i64 = row.get(0)?;
    let date: String = row.get(1)?;
    let tag: String = row.get(2)?;
    let kind: String = row.get(3)?;
    let description: String = row.get(4)?;
    let amount: f64 = row.get(5)?;

    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|e| PfimError::Storage(format!("Bad date '{}' in entry {}: {}", date, id, e)))?;
    let kind = EntryKind::from_code(&kind)
        .ok_or_else(|| PfimError::Storage(format!("Bad kind '{}' in entry {}", kind, id)))?;
    let amount = Amount::from_f64(amount)
        .map_err(|e| PfimError::Storage(format!("Bad amount in entry {}: {}", id, e)))?;

    Ok(StoredEntry::new(
        EntryId::new(id),
        Entry::new(date, tag, kind, description, amount),
    ))
}

impl EntryStore for SqliteStore {
    fn add_entry(&self, entry: &Entry) -> PfimResult<EntryId> {
        check_entry(entry)?;
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO entries (date, tag, kind, description, amount) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                date_value(entry.date),
                entry.tag,
                entry.kind.code(),
                entry.description,
                entry.amount.as_f64()
            ],
        )?;
        let id = EntryId::new(conn.last_insert_rowid());
        debug!(%id, %entry, "inserted entry");
        Ok(id)
    }

    fn fetch(
        &self,
        descriptor: &QueryDescriptor,
        sink: &mut dyn FnMut(StoredEntry) -> PfimResult<()>,
    ) -> PfimResult<usize> {
        expect_operation(descriptor, Operation::Fetch)?;

        let filter = sql::where_clause(&descriptor.predicate);
        let query = format!(
            "SELECT {} FROM entries{}{}",
            ENTRY_COLUMNS,
            filter.sql,
            sql::order_by(descriptor.sort.as_ref())
        );
        debug!(%query, predicate = %descriptor.predicate, "fetching entries");

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&query)?;
        let mut rows = stmt.query(params_from_iter(filter.params.iter()))?;

        let mut delivered = 0;
        while let Some(row) = rows.next()? {
            sink(row_to_entry(row)?)?;
            delivered += 1;
        }
        debug!(delivered, "fetch finished");
        Ok(delivered)
    }

    fn update(&self, descriptor: &QueryDescriptor, replacement: &Replacement) -> PfimResult<usize> {
        expect_operation(descriptor, Operation::Update)?;

        let set = sql::set_clause(replacement);
        let filter = sql::where_clause(&descriptor.predicate);
        let statement = format!("UPDATE entries SET {}{}", set.sql, filter.sql);
        debug!(%statement, predicate = %descriptor.predicate, "updating entries");

        let conn = self.connect()?;
        let affected = conn.execute(
            &statement,
            params_from_iter(set.params.iter().chain(filter.params.iter())),
        )?;
        Ok(affected)
    }

    fn delete(&self, descriptor: &QueryDescriptor) -> PfimResult<usize> {
        expect_operation(descriptor, Operation::Delete)?;

        let filter = sql::where_clause(&descriptor.predicate);
        let statement = format!("DELETE FROM entries{}", filter.sql);
        debug!(%statement, predicate = %descriptor.predicate, "deleting entries");

        let conn = self.connect()?;
        let affected = conn.execute(&statement, params_from_iter(filter.params.iter()))?;
        Ok(affected)
    }
}
