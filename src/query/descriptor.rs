//! Query descriptors: what a request targets and in which order
//!
//! A [`QueryDescriptor`] is storage-agnostic. The SQLite store renders it to
//! SQL; the in-memory store evaluates it directly with [`Predicate::matches`]
//! and [`SortSpec::apply`]. Both must agree.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Amount, Entry, EntryKind, StoredEntry};

/// Kind of request a descriptor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Fetch,
    Update,
    Delete,
}

impl Operation {
    /// Name used in messages, matching the CLI subcommand
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add => "record",
            Self::Fetch => "report",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One condition on an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum Clause {
    /// Tag equals, case-sensitive
    Tag(String),
    Kind(EntryKind),
    /// Date equals
    On(NaiveDate),
    /// Date strictly before
    Before(NaiveDate),
    /// Date strictly after
    After(NaiveDate),
    /// Amount equals
    Amount(Amount),
    /// Description equals, case-sensitive
    Description(String),
}

impl Clause {
    pub fn matches(&self, entry: &Entry) -> bool {
        match self {
            Self::Tag(tag) => entry.tag == *tag,
            Self::Kind(kind) => entry.kind == *kind,
            Self::On(date) => entry.date == *date,
            Self::Before(date) => entry.date < *date,
            Self::After(date) => entry.date > *date,
            Self::Amount(amount) => entry.amount == *amount,
            Self::Description(text) => entry.description == *text,
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => write!(f, "tag = '{}'", tag),
            Self::Kind(kind) => write!(f, "kind = {}", kind),
            Self::On(date) => write!(f, "date = {}", date),
            Self::Before(date) => write!(f, "date < {}", date),
            Self::After(date) => write!(f, "date > {}", date),
            Self::Amount(amount) => write!(f, "amount = {}", amount),
            Self::Description(text) => write!(f, "description = '{}'", text),
        }
    }
}

/// Conjunction of clauses; no clauses matches every entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// A predicate matching every entry
    pub fn everything() -> Self {
        Self::default()
    }

    /// Add a clause (logical AND)
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_everything(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        self.clauses.iter().all(|c| c.matches(entry))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return f.write_str("all entries");
        }
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

/// Column a report may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Date,
    Tag,
    Amount,
}

/// Direction of the primary sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Ordering of a report; ties always fall back to insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Compare two stored entries; ties on the key compare by id, ascending
    pub fn compare(&self, a: &StoredEntry, b: &StoredEntry) -> Ordering {
        let primary = match self.key {
            SortKey::Date => a.entry.date.cmp(&b.entry.date),
            SortKey::Tag => a.entry.tag.cmp(&b.entry.tag),
            SortKey::Amount => a.entry.amount.cmp(&b.entry.amount),
        };
        let primary = match self.order {
            SortOrder::Ascending => primary,
            SortOrder::Descending => primary.reverse(),
        };
        primary.then(a.id.cmp(&b.id))
    }

    pub fn apply(&self, entries: &mut [StoredEntry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }
}

/// Resolved, unambiguous description of one request's target set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryDescriptor {
    pub operation: Operation,
    pub predicate: Predicate,
    /// Only meaningful for fetches; `None` keeps insertion order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
}

impl QueryDescriptor {
    pub fn new(operation: Operation, predicate: Predicate) -> Self {
        Self {
            operation,
            predicate,
            sort: None,
        }
    }

    pub fn sorted(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Filter and order entries in memory
    pub fn apply<I>(&self, entries: I) -> Vec<StoredEntry>
    where
        I: IntoIterator<Item = StoredEntry>,
    {
        let mut matched: Vec<_> = entries
            .into_iter()
            .filter(|e| self.predicate.matches(&e.entry))
            .collect();
        matched.sort_by_key(|e| e.id);
        if let Some(sort) = &self.sort {
            sort.apply(&mut matched);
        }
        matched
    }
}

/// New value written by an update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum Replacement {
    Tag(String),
    Amount(Amount),
    Description(String),
}

impl Replacement {
    pub fn apply(&self, entry: &mut Entry) {
        match self {
            Self::Tag(tag) => entry.tag = tag.clone(),
            Self::Amount(amount) => entry.amount = *amount,
            Self::Description(text) => entry.description = text.clone(),
        }
    }
}

impl fmt::Display for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => write!(f, "tag := '{}'", tag),
            Self::Amount(amount) => write!(f, "amount := {}", amount),
            Self::Description(text) => write!(f, "description := '{}'", text),
        }
    }
}

/// An update: which entries, and what they get
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatePlan {
    pub descriptor: QueryDescriptor,
    pub replacement: Replacement,
}
