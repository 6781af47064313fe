//! YAML Export functionality
//!
//! Same content as the JSON export, for reading by humans.

use std::io::Write;

use crate::error::{PfimError, PfimResult};
use crate::export::json::ReportExport;
use crate::reports::EntryReport;

/// Export a report to YAML
pub fn export_report_yaml<W: Write>(report: &EntryReport, writer: &mut W) -> PfimResult<()> {
    let export = ReportExport::from_report(report);

    writeln!(writer, "# PFIM Report Export")
        .map_err(|e| PfimError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| PfimError::Export(e.to_string()))?;
    writeln!(writer, "# Filter: {}", export.filter)
        .map_err(|e| PfimError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| PfimError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| PfimError::Export(e.to_string()))?;

    Ok(())
}
