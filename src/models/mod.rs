//! Core data models for PFIM
//!
//! An [`Entry`] is the single domain record; [`Amount`] keeps its value exact
//! and non-negative.

pub mod amount;
pub mod entry;

pub use amount::{Amount, AmountParseError};
pub use entry::{Entry, EntryId, EntryKind, EntryValidationError, StoredEntry};
