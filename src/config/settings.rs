//! User settings for PFIM
//!
//! Manages user preferences: default tag, report column widths, log level and
//! an optional database location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::PfimPaths;
use crate::error::PfimError;

/// User settings for PFIM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Tag given to entries recorded without one
    #[serde(default = "default_tag")]
    pub default_tag: String,

    /// Display width of the description column
    #[serde(default = "default_description_width")]
    pub description_width: usize,

    /// Display width of the tag column
    #[serde(default = "default_tag_width")]
    pub tag_width: usize,

    /// Log filter used for the diagnostic log (tracing env-filter syntax)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Database file, when it should not live in the base directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_file: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_tag() -> String {
    "N/A".to_string()
}

fn default_description_width() -> usize {
    30
}

fn default_tag_width() -> usize {
    12
}

fn default_log_level() -> String {
    "debug".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_tag: default_tag(),
            description_width: default_description_width(),
            tag_width: default_tag_width(),
            log_level: default_log_level(),
            database_file: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PfimPaths) -> Result<Self, PfimError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| PfimError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PfimError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PfimPaths) -> Result<(), PfimError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PfimError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PfimError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings the report formatter cannot honour
    pub fn validate(&self) -> Result<(), PfimError> {
        if self.default_tag.trim().is_empty() {
            return Err(PfimError::Config("default_tag must not be empty".into()));
        }
        // Truncation keeps three characters for "..."
        if self.description_width < 4 || self.tag_width < 4 {
            return Err(PfimError::Config(
                "description_width and tag_width must be at least 4".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_tag, "N/A");
        assert_eq!(settings.description_width, 30);
        assert_eq!(settings.tag_width, 12);
        assert!(settings.database_file.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PfimPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.default_tag = "MISC".into();
        settings.description_width = 40;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_tag, "MISC");
        assert_eq!(loaded.description_width, 40);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"default_tag": "GEN"}"#).unwrap();
        assert_eq!(settings.default_tag, "GEN");
        assert_eq!(settings.tag_width, 12);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_invalid_widths_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PfimPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"description_width": 2}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, PfimError::Config(_)));
    }
}
