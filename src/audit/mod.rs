//! Audit logging for PFIM
//!
//! Every mutation (record, update, delete) appends one line of JSON to
//! `audit.log`: the action, its target and the number of rows touched.
//!
//! # Example
//!
//! ```rust,ignore
//! use pfim::audit::{AuditLogger, AuditRecord};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditRecord::created(id, &entry))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditAction, AuditRecord};
pub use logger::AuditLogger;
