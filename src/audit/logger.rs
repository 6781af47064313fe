//! Audit logger for the append-only audit log
//!
//! Each record is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{PfimError, PfimResult};

use super::entry::AuditRecord;

/// Appends audit records to a JSONL file
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a logger writing to `log_path`
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append a record
    pub fn log(&self, record: &AuditRecord) -> PfimResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| PfimError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(record)
            .map_err(|e| PfimError::Json(format!("Failed to serialize audit record: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| PfimError::Io(format!("Failed to write audit record: {}", e)))?;

        file.flush()
            .map_err(|e| PfimError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read every record, oldest first
    pub fn read_all(&self) -> PfimResult<Vec<AuditRecord>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| PfimError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut records = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                PfimError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let record: AuditRecord = serde_json::from_str(&line).map_err(|e| {
                PfimError::Json(format!(
                    "Failed to parse audit record at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            records.push(record);
        }

        Ok(records)
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
