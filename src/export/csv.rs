//! CSV Export functionality
//!
//! One record per report row; the summary is not part of the CSV.

use std::io::Write;

use ::csv::Writer;

use crate::error::{PfimError, PfimResult};
use crate::reports::EntryReport;

use super::ExportRow;

const HEADER: [&str; 6] = ["ID", "Date", "Kind", "Tag", "Description", "Amount"];

/// Export report rows to CSV
pub fn export_report_csv<W: Write>(report: &EntryReport, writer: W) -> PfimResult<()> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record(HEADER)
        .map_err(|e| PfimError::Export(e.to_string()))?;

    for stored in &report.entries {
        let row = ExportRow::from(stored);
        wtr.write_record([
            row.id.to_string(),
            row.date,
            row.kind,
            row.tag,
            row.description,
            row.amount,
        ])
        .map_err(|e| PfimError::Export(e.to_string()))?;
    }

    wtr.flush()
        .map_err(|e| PfimError::Export(format!("Failed to flush CSV: {}", e)))?;
    Ok(())
}
