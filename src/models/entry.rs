//! Entry model
//!
//! An entry is one recorded income or expense: a date, a tag, a kind, a short
//! description and a non-negative amount.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;

/// Longest tag accepted on record or update
pub const MAX_TAG_LEN: usize = 32;

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Income
    Earned,
    /// Expense
    Spent,
}

impl EntryKind {
    /// Single-character code used in the `kind` column
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Earned => "E",
            Self::Spent => "S",
        }
    }

    /// Parse the single-character storage code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "E" => Some(Self::Earned),
            "S" => Some(Self::Spent),
            _ => None,
        }
    }

    /// Short label shown in report rows
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Earned => "INC",
            Self::Spent => "EXP",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Earned => write!(f, "income"),
            Self::Spent => write!(f, "expense"),
        }
    }
}

/// Row identifier assigned by the store; increases with insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(i64);

impl EntryId {
    /// Wrap a raw row id
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw row id
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single income or expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Day the money moved
    pub date: NaiveDate,

    /// Free-form label grouping related entries
    pub tag: String,

    /// Income or expense
    pub kind: EntryKind,

    /// Short free-form description
    #[serde(default)]
    pub description: String,

    /// Value of the entry, always non-negative
    pub amount: Amount,
}

impl Entry {
    /// Create a new entry
    pub fn new(
        date: NaiveDate,
        tag: impl Into<String>,
        kind: EntryKind,
        description: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            date,
            tag: tag.into(),
            kind,
            description: description.into(),
            amount,
        }
    }

    /// Create an income entry
    pub fn earned(
        date: NaiveDate,
        tag: impl Into<String>,
        description: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self::new(date, tag, EntryKind::Earned, description, amount)
    }

    /// Create an expense entry
    pub fn spent(
        date: NaiveDate,
        tag: impl Into<String>,
        description: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self::new(date, tag, EntryKind::Spent, description, amount)
    }

    /// Validate the entry
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_tag(&self.tag)?;
        validate_description(&self.description)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.tag,
            self.amount
        )
    }
}

/// An entry together with the id the store gave it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub id: EntryId,
    #[serde(flatten)]
    pub entry: Entry,
}

impl StoredEntry {
    pub fn new(id: EntryId, entry: Entry) -> Self {
        Self { id, entry }
    }
}

/// Check a tag before it is stored
pub fn validate_tag(tag: &str) -> Result<(), EntryValidationError> {
    if tag.trim().is_empty() {
        return Err(EntryValidationError::EmptyTag);
    }
    if tag.chars().count() > MAX_TAG_LEN {
        return Err(EntryValidationError::TagTooLong(tag.to_string()));
    }
    if tag.contains(['\n', '\r']) {
        return Err(EntryValidationError::MultilineText(tag.to_string()));
    }
    Ok(())
}

/// Check a description before it is stored
pub fn validate_description(description: &str) -> Result<(), EntryValidationError> {
    if description.contains(['\n', '\r']) {
        return Err(EntryValidationError::MultilineText(description.to_string()));
    }
    Ok(())
}

/// Validation errors for entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyTag,
    TagTooLong(String),
    MultilineText(String),
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTag => write!(f, "Tag must not be empty"),
            Self::TagTooLong(tag) => write!(
                f,
                "Tag '{}' is longer than {} characters",
                tag, MAX_TAG_LEN
            ),
            Self::MultilineText(text) => write!(f, "Text must fit on one line: {:?}", text),
        }
    }
}

impl std::error::Error for EntryValidationError {}
