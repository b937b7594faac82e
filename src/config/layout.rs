//! On-disk layout of the data directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CLEANED_PREFIX: &str = "Weekly_Cleaned_";
pub const WIDE_PREFIX: &str = "Changes_";
pub const LONG_PREFIX: &str = "ChangesLong_";
pub const APPROVED_PREFIX: &str = "Approved_Changes_";

#[derive(Debug, Clone)]
pub struct DataLayout {
    pub root: PathBuf,
    pub raw: PathBuf,
    pub staging: PathBuf,
    pub history: PathBuf,
    pub live_file: PathBuf,
    pub backups: PathBuf,
    pub wide: PathBuf,
    pub long: PathBuf,
    pub approved: PathBuf,
    pub log_file: PathBuf,
}

impl DataLayout {
    pub fn new(root: PathBuf, live_file_name: &str) -> Self {
        let live_dir = root.join("live");
        let diffs = root.join("diffs");
        Self {
            raw: root.join("raw"),
            staging: root.join("staging"),
            history: root.join("history"),
            live_file: live_dir.join(live_file_name),
            backups: live_dir.join("backups"),
            wide: diffs.join("wide"),
            long: diffs.join("long"),
            approved: diffs.join("approved"),
            log_file: root.join("logs").join("manual_updates.log"),
            root,
        }
    }

    /// Create every directory of the layout (idempotent).
    pub fn ensure_dirs(&self) -> io::Result<()> {
        for dir in [
            &self.raw,
            &self.staging,
            &self.history,
            &self.backups,
            &self.wide,
            &self.long,
            &self.approved,
        ] {
            fs::create_dir_all(dir)?;
        }
        if let Some(parent) = self.log_file.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn cleaned_file(&self, dir: &Path, date: &str) -> PathBuf {
        dir.join(format!("{CLEANED_PREFIX}{date}.csv"))
    }

    pub fn wide_file(&self, date: &str) -> PathBuf {
        self.wide.join(format!("{WIDE_PREFIX}{date}.csv"))
    }

    pub fn long_file(&self, date: &str) -> PathBuf {
        self.long.join(format!("{LONG_PREFIX}{date}.csv"))
    }

    pub fn approved_file(&self, date: &str) -> PathBuf {
        self.approved.join(format!("{APPROVED_PREFIX}{date}.csv"))
    }
}
