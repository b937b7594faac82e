//! Locating input snapshots on disk.

use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

fn csv_files(dir: &Path) -> AppResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if path.is_file() && is_csv {
            out.push(path);
        }
    }
    Ok(out)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Most recently modified `.csv` file of `dir`.
///
/// Ties on modification time are broken by file name so the choice stays
/// deterministic.
pub fn newest_by_mtime(dir: &Path) -> AppResult<PathBuf> {
    let mut candidates: Vec<(SystemTime, String, PathBuf)> = Vec::new();
    for path in csv_files(dir)? {
        let modified = fs::metadata(&path)?.modified()?;
        candidates.push((modified, file_name(&path), path));
    }

    candidates
        .into_iter()
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
        .map(|(_, _, p)| p)
        .ok_or_else(|| {
            AppError::MissingSource(format!("no .csv file found in {}", dir.display()))
        })
}

/// `.csv` files of `dir` whose name starts with `prefix`, sorted by name.
pub fn list_by_prefix(dir: &Path, prefix: &str) -> AppResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = csv_files(dir)?
        .into_iter()
        .filter(|p| file_name(p).starts_with(prefix))
        .collect();
    files.sort_by_key(|p| file_name(p));
    Ok(files)
}

/// Last file by name with the given prefix.
pub fn newest_by_name(dir: &Path, prefix: &str) -> AppResult<PathBuf> {
    list_by_prefix(dir, prefix)?.pop().ok_or_else(|| {
        AppError::MissingSource(format!(
            "no {prefix}*.csv file found in {}",
            dir.display()
        ))
    })
}

/// The snapshot archived right before `current_name` (greatest name below
/// it), if any.
pub fn previous_by_name(dir: &Path, prefix: &str, current_name: &str) -> AppResult<Option<PathBuf>> {
    Ok(list_by_prefix(dir, prefix)?
        .into_iter()
        .filter(|p| file_name(p).as_str() < current_name)
        .next_back())
}
