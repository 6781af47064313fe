//! Path management for PFIM
//!
//! Resolves where the database, settings, logs and audit trail live.
//!
//! ## Path Resolution Order
//!
//! 1. `PFIM_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory joined with `pfim`
//!    (`~/.config/pfim` on Linux, `~/Library/Application Support/pfim` on
//!    macOS, `%APPDATA%\pfim` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::PfimError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "PFIM_DATA_DIR";

/// Manages all paths used by PFIM
#[derive(Debug, Clone)]
pub struct PfimPaths {
    /// Base directory for all PFIM data
    base_dir: PathBuf,
    /// Explicit database file, when overridden by flag or settings
    database_override: Option<PathBuf>,
}

impl PfimPaths {
    /// Create a new PfimPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and
    /// `PFIM_DATA_DIR` is not set.
    pub fn new() -> Result<Self, PfimError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self {
            base_dir,
            database_override: None,
        })
    }

    /// Create PfimPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            database_override: None,
        }
    }

    /// Point the database at an explicit file instead of `<base>/pfim.db`
    pub fn with_database_file(mut self, path: PathBuf) -> Self {
        self.database_override = Some(path);
        self
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the SQLite database
    pub fn database_file(&self) -> PathBuf {
        self.database_override
            .clone()
            .unwrap_or_else(|| self.base_dir.join("pfim.db"))
    }

    /// Get the path to the diagnostic log
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("pfim.log")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory and the database's parent directory exist
    pub fn ensure_directories(&self) -> Result<(), PfimError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PfimError::Io(format!("Failed to create base directory: {}", e)))?;

        if let Some(parent) = self.database_file().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    PfimError::Io(format!("Failed to create database directory: {}", e))
                })?;
            }
        }

        Ok(())
    }
}

/// Resolve the default base directory from the platform's config location
fn resolve_default_path() -> Result<PathBuf, PfimError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| PfimError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("pfim"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PfimPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.database_file(), temp_dir.path().join("pfim.db"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);

        let paths = PfimPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    fn test_database_override() {
        let temp_dir = TempDir::new().unwrap();
        let db = temp_dir.path().join("nested").join("ledger.db");
        let paths =
            PfimPaths::with_base_dir(temp_dir.path().join("base")).with_database_file(db.clone());

        assert_eq!(paths.database_file(), db);
        assert!(!db.exists());

        paths.ensure_directories().unwrap();
        assert!(temp_dir.path().join("nested").exists());
        assert!(temp_dir.path().join("base").exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PfimPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.log_file(), temp_dir.path().join("pfim.log"));
    }
}
