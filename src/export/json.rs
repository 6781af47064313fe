//! JSON Export functionality
//!
//! Exports a report, rows and summary, with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{PfimError, PfimResult};
use crate::reports::{EntryReport, Summary};

use super::ExportRow;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Per-kind totals as exported
#[derive(Debug, Clone, Serialize)]
pub struct ExportTotals {
    pub earned: String,
    pub spent: String,
    pub net: String,
}

/// Report export structure
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Predicate the rows were fetched with
    pub filter: String,

    /// Rows in report order
    pub entries: Vec<ExportRow>,

    /// Absent when there are no rows
    pub summary: Option<Summary>,

    pub totals: ExportTotals,
}

impl ReportExport {
    /// Create an export from a built report
    pub fn from_report(report: &EntryReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            filter: report.filter.clone(),
            entries: report.entries.iter().map(ExportRow::from).collect(),
            summary: report.summary,
            totals: ExportTotals {
                earned: report.totals.earned.to_string(),
                spent: report.totals.spent.to_string(),
                net: report.totals.format_net(),
            },
        }
    }
}

/// Export a report to JSON
pub fn export_report_json<W: Write>(
    report: &EntryReport,
    writer: &mut W,
    pretty: bool,
) -> PfimResult<()> {
    let export = ReportExport::from_report(report);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| PfimError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| PfimError::Export(e.to_string()))?;

    Ok(())
}
