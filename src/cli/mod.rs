//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod delete;
pub mod record;
pub mod report;
pub mod update;

pub use delete::{handle_delete_command, DeleteArgs};
pub use record::{handle_record_command, RecordArgs};
pub use report::{handle_report_command, ReportArgs};
pub use update::{handle_update_command, UpdateArgs};
