#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use stakesync::models::{Record, Snapshot};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const LEGACY_HEADER: &str =
    "name,company,status,nominator,clearance_level,date_submitted,date_cleared";

pub fn sts() -> Command {
    cargo_bin_cmd!("stakesync")
}

/// Build a record from `(field, cell)` pairs; empty cells are absent.
pub fn record(pairs: &[(&str, &str)]) -> Record {
    Record::from_pairs(pairs.iter().map(|(k, v)| (*k, *v)))
}

pub fn snapshot(label: &str, rows: &[&[(&str, &str)]]) -> Snapshot {
    Snapshot::from_records(label, rows.iter().map(|r| record(r)).collect())
}

/// A legacy-profile row.
pub fn legacy_row(name: &str, company: &str, status: &str, cleared: &str) -> String {
    format!("{name},{company},{status},Jane Roe,Secret,2024-01-15,{cleared}")
}

pub fn write_csv(path: &Path, lines: &[&str]) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, format!("{}\n", lines.join("\n"))).expect("write csv");
    path.to_path_buf()
}

/// Isolated config file and data directory for CLI tests.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> PathBuf {
        self.path().join("stakesync.conf")
    }

    pub fn data(&self) -> PathBuf {
        self.path().join("data")
    }

    pub fn live_file(&self) -> PathBuf {
        self.data().join("live").join("Stakeholder_Live_Clean.csv")
    }

    pub fn raw(&self, name: &str) -> PathBuf {
        self.data().join("raw").join(name)
    }

    /// `stakesync --config <tmp> --data-dir <tmp>/data`
    pub fn cmd(&self) -> Command {
        let mut cmd = sts();
        cmd.arg("--config")
            .arg(self.config())
            .arg("--data-dir")
            .arg(self.data());
        cmd
    }

    pub fn init(&self) {
        self.cmd().arg("init").assert().success();
    }

    pub fn files_in(&self, sub: &str) -> Vec<PathBuf> {
        let dir = self.data().join(sub);
        let mut files: Vec<PathBuf> = match fs::read_dir(&dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.is_file())
                .collect(),
            Err(_) => Vec::new(),
        };
        files.sort();
        files
    }
}
