//! PFIM - Personal finance manager for the command line
//!
//! This library provides the core functionality behind the `pfim` binary:
//! recording incomes and expenses, turning sparse command-line options into
//! validated queries, running them against a storage backend and summarizing
//! the result.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (entries, amounts)
//! - `query`: Option validation and query descriptors
//! - `storage`: Storage port with SQLite and in-memory backends
//! - `reports`: Report generation and summary statistics
//! - `display`: Terminal formatting of entries
//! - `export`: CSV, JSON and YAML report export
//! - `services`: Business logic layer
//! - `audit`: Audit logging of mutations
//! - `cli`: Command-line argument handling
//!
//! # Example
//!
//! ```rust,ignore
//! use pfim::query::{FetchOptions, QueryBuilder};
//! use pfim::services::LedgerService;
//! use pfim::storage::SqliteStore;
//!
//! let store = SqliteStore::open("pfim.db")?;
//! let service = LedgerService::new(&store, QueryBuilder::new(today));
//! let report = service.report(&FetchOptions::new().expense().sort_by_amount())?;
//! print!("{}", report.format_terminal(&Default::default()));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod query;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PfimError, PfimResult};
