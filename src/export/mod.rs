//! Export module for PFIM
//!
//! Writes a report to a file instead of the terminal:
//! - CSV: report rows only (spreadsheet-compatible)
//! - JSON: rows, summary and totals (machine-readable)
//! - YAML: rows, summary and totals (human-readable)

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{PfimError, PfimResult};
use crate::models::StoredEntry;
use crate::reports::EntryReport;

pub use self::csv::export_report_csv;
pub use json::{export_report_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;

/// One report row with display-formatted fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub tag: String,
    pub description: String,
    /// Two decimals, no sign
    pub amount: String,
}

impl From<&StoredEntry> for ExportRow {
    fn from(stored: &StoredEntry) -> Self {
        Self {
            id: stored.id.get(),
            date: stored.entry.date.format("%Y-%m-%d").to_string(),
            kind: stored.entry.kind.to_string(),
            tag: stored.entry.tag.clone(),
            description: stored.entry.description.clone(),
            amount: stored.entry.amount.to_string(),
        }
    }
}

/// File format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        ext.parse().ok()
    }
}

impl FromStr for ExportFormat {
    type Err = PfimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(PfimError::Validation(format!(
                "Unknown export format '{}': use csv, json or yaml",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Write a report to `path` in `format`
pub fn export_report_to_file(
    report: &EntryReport,
    path: &Path,
    format: ExportFormat,
) -> PfimResult<()> {
    let file = File::create(path)
        .map_err(|e| PfimError::Io(format!("Failed to create {}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => export_report_csv(report, &mut writer)?,
        ExportFormat::Json => export_report_json(report, &mut writer, true)?,
        ExportFormat::Yaml => export_report_yaml(report, &mut writer)?,
    }

    std::io::Write::flush(&mut writer)
        .map_err(|e| PfimError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    Ok(())
}
