//! Append-only JSONL audit log
//!
//! One JSON object per line, flushed after each write.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{BalanceError, BalanceResult};

use super::entry::AuditEntry;

/// Writes and reads the audit log file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> BalanceResult<()> {
        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| BalanceError::Io(format!("Failed to create audit directory: {}", e)))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| BalanceError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| BalanceError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| BalanceError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| BalanceError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Append an entry, downgrading failure to a warning.
    ///
    /// Used after a store write already succeeded; the mutation stands either way.
    pub fn record(&self, entry: &AuditEntry) {
        if let Err(e) = self.log(entry) {
            tracing::warn!(
                operation = %entry.operation,
                entity = %entry.entity_type,
                id = %entry.entity_id,
                error = %e,
                "failed to write audit entry"
            );
        }
    }

    /// All entries, oldest first
    pub fn read_all(&self) -> BalanceResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| BalanceError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                BalanceError::Io(format!("Failed to read audit log line {}: {}", idx + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                BalanceError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    idx + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> BalanceResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{EntityType, Operation};
    use serde_json::json;
    use tempfile::TempDir;

    fn logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn entry(i: usize) -> AuditEntry {
        AuditEntry::create(
            EntityType::Transaction,
            format!("txn-{}", i),
            None,
            &json!({"price": i}),
        )
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = logger();
        logger.log(&entry(1)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_type, EntityType::Transaction);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = logger();
        for i in 0..10 {
            logger.log(&entry(i)).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        let ids: Vec<_> = recent.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["txn-7", "txn-8", "txn-9"]);
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_creates_missing_parent() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("nested").join("audit.log"));
        logger.log(&entry(1)).unwrap();
        assert_eq!(logger.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_record_swallows_errors() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be opened for appending
        let logger = AuditLogger::new(temp_dir.path().to_path_buf());
        logger.record(&entry(1));
    }

    #[test]
    fn test_corrupt_line_reports_line_number() {
        let (logger, _temp) = logger();
        logger.log(&entry(1)).unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(logger.path())
            .unwrap()
            .write_all(b"{broken\n")
            .unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
