//! Display formatting for terminal output
//!
//! Fixed-width rows and detail blocks for entries.

pub mod entry;

pub use entry::{format_entry_details, format_entry_header, format_entry_row, truncate, RowLayout};
