//! Append-only audit log
//!
//! One JSON object per line, flushed after every write so a crash never
//! loses an entry that was reported as logged.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{LedgerError, LedgerResult};

use super::entry::AuditEntry;

/// Writes and reads the JSONL audit log
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a logger writing to `log_path`; the file is created on first write
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> LedgerResult<()> {
        let json = serde_json::to_string(entry)
            .map_err(|e| LedgerError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| LedgerError::Io(format!("Failed to open audit log: {}", e)))?;

        writeln!(file, "{}", json)
            .and_then(|_| file.flush())
            .map_err(|e| LedgerError::Io(format!("Failed to write audit entry: {}", e)))
    }

    /// Every entry, oldest first
    pub fn read_all(&self) -> LedgerResult<Vec<AuditEntry>> {
        let Some(reader) = self.reader()? else {
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line_num = index + 1;
            let line = line.map_err(|e| {
                LedgerError::Io(format!("Failed to read audit log line {}: {}", line_num, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let entry = serde_json::from_str(&line).map_err(|e| {
                LedgerError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num, e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> LedgerResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    /// Number of non-empty lines in the log
    pub fn entry_count(&self) -> LedgerResult<usize> {
        let Some(reader) = self.reader()? else {
            return Ok(0);
        };

        Ok(reader
            .lines()
            .map_while(Result::ok)
            .filter(|l| !l.trim().is_empty())
            .count())
    }

    /// Whether anything has been logged yet
    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    /// Location of the log file
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    fn reader(&self) -> LedgerResult<Option<BufReader<File>>> {
        if !self.log_path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.log_path)
            .map_err(|e| LedgerError::Io(format!("Failed to open audit log: {}", e)))?;
        Ok(Some(BufReader::new(file)))
    }
}
