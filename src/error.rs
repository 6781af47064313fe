//! Custom error types for PFIM
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Errors fall into three families: input
//! errors (detected before any storage access), storage errors and
//! aggregation errors.

use thiserror::Error;

/// The main error type for PFIM operations
#[derive(Error, Debug)]
pub enum PfimError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Options that cannot be combined in one request
    #[error("Conflicting options for {operation}: {} cannot be combined", .options.join(", "))]
    ConflictingOptions {
        operation: &'static str,
        options: Vec<String>,
    },

    /// A request that needs exactly one option out of a group got none
    #[error("Missing option for {operation}: expected one of {}", .expected.join(", "))]
    MissingOption {
        operation: &'static str,
        expected: Vec<String>,
    },

    /// Malformed calendar date
    #[error("Invalid date '{0}': use YYYY-MM-DD")]
    InvalidDate(String),

    /// Malformed or negative amount
    #[error("Invalid amount '{0}': use a non-negative value like 75 or 75.50")]
    InvalidAmount(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Aggregation over zero amounts
    #[error("Cannot summarize an empty set of amounts")]
    EmptySample,

    /// Sample standard deviation needs at least two amounts
    #[error("Standard deviation is undefined for a single amount")]
    StdevUndefined,
}

impl PfimError {
    /// Create a conflict error from option labels
    pub fn conflict<I, S>(operation: &'static str, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self::ConflictingOptions {
            operation,
            options: options.into_iter().map(|o| o.to_string()).collect(),
        }
    }

    /// Create a missing-option error from option labels
    pub fn missing<I, S>(operation: &'static str, expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self::MissingOption {
            operation,
            expected: expected.into_iter().map(|o| o.to_string()).collect(),
        }
    }

    /// Check if this error was caused by the caller's input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::ConflictingOptions { .. }
                | Self::MissingOption { .. }
                | Self::InvalidDate(_)
                | Self::InvalidAmount(_)
        )
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        if self.is_input_error() {
            2
        } else {
            1
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for PfimError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PfimError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<rusqlite::Error> for PfimError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for PFIM operations
pub type PfimResult<T> = Result<T, PfimError>;
