use crate::store::StoreError;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Append-only, human-readable log of recorded debts and settlements.
pub trait AuditSink {
    fn record(&mut self, line: &str) -> Result<(), StoreError>;

    /// Everything recorded so far, oldest first.
    fn entries(&self) -> Result<Vec<String>, StoreError>;
}

/// Writes one line per event, suffixed with a local timestamp:
///
/// ```text
/// Alice pays 50 to Carol | Time: Fri Oct 16 09:12:44 2026
/// ```
#[derive(Debug, Clone)]
pub struct FileAuditLog {
    path: PathBuf,
}

impl FileAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileAuditLog {
    fn record(&mut self, line: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{} | Time: {}",
            line,
            Local::now().format("%a %b %e %T %Y")
        )?;
        Ok(())
    }

    /// Empty if nothing was ever logged.
    fn entries(&self) -> Result<Vec<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory sink, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditLog {
    lines: Vec<String>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl AuditSink for MemoryAuditLog {
    fn record(&mut self, line: &str) -> Result<(), StoreError> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.lines.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_log_appends_with_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = FileAuditLog::new(dir.path().join("history.txt"));
        assert!(log.entries().unwrap().is_empty());

        log.record("A pays 10 to B").unwrap();
        log.record("B pays 5 to C").unwrap();

        let lines = log.entries().unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("A pays 10 to B | Time: "));
        assert!(lines[1].starts_with("B pays 5 to C | Time: "));
    }

    #[test]
    fn test_memory_log() {
        let mut log = MemoryAuditLog::new();
        log.record("x").unwrap();
        assert_eq!(log.lines(), ["x".to_string()]);
        assert_eq!(log.entries().unwrap(), vec!["x".to_string()]);
    }
}
