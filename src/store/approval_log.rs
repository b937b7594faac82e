//! Append-only text log of canonical dataset changes.
//!
//! One line per event: `[YYYY-MM-DD HH:MM:SS] <operation>: <target>`.

use crate::errors::AppResult;
use crate::utils::date::log_stamp;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

pub const ROW_UPDATED: &str = "Row updated";
pub const ROW_ADDED: &str = "Row added";
pub const BACKUP_CREATED: &str = "Backup created";
pub const LIVE_SEEDED: &str = "Live seeded";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub stamp: String,
    pub operation: String,
    pub target: String,
}

impl LogEntry {
    pub fn render(&self) -> String {
        format!("[{}] {}: {}", self.stamp, self.operation, self.target)
    }

    /// Parse one log line; lines not following the format are skipped by
    /// callers.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix('[')?;
        let (stamp, rest) = rest.split_once(']')?;
        let (operation, target) = rest.trim_start().split_once(':')?;
        Some(Self {
            stamp: stamp.to_string(),
            operation: operation.trim().to_string(),
            target: target.trim().to_string(),
        })
    }
}

/// Append entries, all stamped with the current time.
pub fn append<I, S>(path: &Path, operation: &str, targets: I) -> AppResult<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    let stamp = log_stamp();
    let mut written = 0;
    for target in targets {
        let entry = LogEntry {
            stamp: stamp.clone(),
            operation: operation.to_string(),
            target: target.as_ref().to_string(),
        };
        writeln!(file, "{}", entry.render())?;
        written += 1;
    }
    Ok(written)
}

/// All well-formed entries of the log, oldest first. A missing file is an
/// empty log.
pub fn read(path: &Path) -> AppResult<Vec<LogEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(content.lines().filter_map(LogEntry::parse).collect())
}
