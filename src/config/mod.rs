//! Configuration module for PFIM
//!
//! This module provides configuration management including:
//! - Per-user path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PfimPaths;
pub use settings::Settings;
