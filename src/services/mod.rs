//! Service layer for PFIM
//!
//! The service layer sits between the front end and the storage port: it
//! builds descriptors from raw options, runs them and audits mutations.

pub mod ledger;

pub use ledger::LedgerService;
