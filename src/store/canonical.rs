use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::Snapshot;
use crate::models::snapshot::LIVE;
use crate::store::csv_io;
use crate::store::fs_utils::write_replacing;
use crate::utils::date::backup_stamp;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipWriter;
use zip::write::FileOptions;

/// The authoritative dataset file and its backup directory.
///
/// Every overwrite goes through [`CanonicalStore::commit`], which takes a
/// full timestamped backup first and replaces the file through a sibling
/// temporary file.
#[derive(Debug, Clone)]
pub struct CanonicalStore {
    pub path: PathBuf,
    pub backups: PathBuf,
    pub compress: bool,
}

impl CanonicalStore {
    pub fn new(path: PathBuf, backups: PathBuf, compress: bool) -> Self {
        Self {
            path,
            backups,
            compress,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let layout = cfg.layout();
        Self::new(layout.live_file, layout.backups, cfg.compress_backups)
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the canonical dataset; blank lines are dropped.
    pub fn load(&self) -> AppResult<Snapshot> {
        if !self.exists() {
            return Err(AppError::MissingSource(format!(
                "canonical dataset not found: {}",
                self.path.display()
            )));
        }
        let mut snapshot = csv_io::read_snapshot(&self.path, LIVE)?;
        snapshot.drop_blank_rows();
        Ok(snapshot)
    }

    pub fn load_optional(&self) -> AppResult<Option<Snapshot>> {
        if self.exists() {
            self.load().map(Some)
        } else {
            Ok(None)
        }
    }

    /// First write of the canonical dataset. Refuses to replace an existing
    /// file.
    pub fn bootstrap(&self, snapshot: &Snapshot) -> AppResult<()> {
        if self.exists() {
            return Err(AppError::InvalidInput(format!(
                "canonical dataset already exists: {}",
                self.path.display()
            )));
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_replacing(&self.path, |tmp| csv_io::write_snapshot(tmp, snapshot))
    }

    /// Timestamped copy of the canonical dataset in the backup directory.
    pub fn backup(&self) -> AppResult<PathBuf> {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "canonical".to_string());
        let stamp = backup_stamp();
        let mut dest = self.backups.join(format!("{stem}_backup_{stamp}.csv"));
        let mut n = 1;
        while backup_taken(&dest) {
            dest = self.backups.join(format!("{stem}_backup_{stamp}_{n}.csv"));
            n += 1;
        }
        self.backup_to(&dest, self.compress)
    }

    /// Copy the canonical dataset to `dest`, zipping it when `compress` is
    /// set. Returns the path of the file actually kept.
    pub fn backup_to(&self, dest: &Path, compress: bool) -> AppResult<PathBuf> {
        if !self.exists() {
            return Err(AppError::MissingSource(format!(
                "canonical dataset not found: {}",
                self.path.display()
            )));
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&self.path, dest)?;

        if !compress {
            return Ok(dest.to_path_buf());
        }

        let compressed = compress_backup(dest)?;
        if compressed != dest {
            fs::remove_file(dest)?;
        }
        Ok(compressed)
    }

    /// Replace the canonical dataset with `snapshot`.
    ///
    /// The backup is taken before anything is written; when it fails the
    /// canonical file is not touched.
    pub fn commit(&self, snapshot: &Snapshot) -> AppResult<PathBuf> {
        let backup = self.backup()?;
        debug!(backup = %backup.display(), rows = snapshot.len(), "committing canonical dataset");
        write_replacing(&self.path, |tmp| csv_io::write_snapshot(tmp, snapshot))?;
        Ok(backup)
    }
}

/// An earlier backup already uses this name, plain or zipped.
fn backup_taken(dest: &Path) -> bool {
    dest.exists() || dest.with_extension("zip").exists()
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "backup.csv".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(name, options)?;
    std::io::copy(&mut f, &mut zip)?;
    zip.finish()?;

    Ok(zip_path)
}
