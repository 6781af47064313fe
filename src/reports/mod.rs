//! Reports module for PFIM
//!
//! A report is the ordered rows of one fetch followed by summary statistics
//! over their amounts.

pub mod entries;
pub mod summary;

pub use entries::{EntryReport, Totals};
pub use summary::Summary;
