use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::layout::CLEANED_PREFIX;
use crate::core::clean::clean_raw;
use crate::errors::AppResult;
use crate::models::Snapshot;
use crate::models::snapshot::{PREVIOUS_WEEKLY, WEEKLY};
use crate::store::{csv_io, discovery};
use crate::ui::messages::{dry_run, info, success, warning};
use crate::utils::date::today_str;
use crate::utils::path::expand_tilde;
use std::path::{Path, PathBuf};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clean { input, dry_run } = cmd {
        ingest(cfg, input.as_deref(), *dry_run)?;
    }
    Ok(())
}

/// A cleaned weekly snapshot and its (possibly not yet written) history copy.
pub(crate) struct Ingested {
    pub snapshot: Snapshot,
    pub archived: PathBuf,
}

/// Locate the raw export, clean it and stage it (staging/ + history/).
pub(crate) fn ingest(cfg: &Config, input: Option<&str>, dry: bool) -> AppResult<Ingested> {
    let layout = cfg.layout();

    let source = match input {
        Some(p) => expand_tilde(p),
        None => discovery::newest_by_mtime(&layout.raw)?,
    };
    info(format!("Raw file: {}", source.display()));

    let raw = csv_io::read_snapshot(&source, WEEKLY)?;
    let report = clean_raw(raw, &cfg.fields)?;

    if !report.extra_columns.is_empty() {
        warning(format!(
            "Ignoring unexpected columns: {}",
            report.extra_columns.join(", ")
        ));
    }
    if report.dropped_rows > 0 {
        info(format!("Dropped {} empty rows", report.dropped_rows));
    }

    let date = today_str();
    let staged = layout.cleaned_file(&layout.staging, &date);
    let archived = layout.cleaned_file(&layout.history, &date);

    if dry {
        dry_run(format!(
            "{} cleaned rows would be written to {}",
            report.snapshot.len(),
            staged.display()
        ));
    } else {
        csv_io::write_snapshot(&staged, &report.snapshot)?;
        csv_io::write_snapshot(&archived, &report.snapshot)?;
        success(format!(
            "Cleaned {} rows → {}",
            report.snapshot.len(),
            staged.display()
        ));
    }

    Ok(Ingested {
        snapshot: report.snapshot,
        archived,
    })
}

/// The history snapshot archived before `current` (by file name).
pub(crate) fn previous_snapshot(cfg: &Config, current: &Path) -> AppResult<Option<Snapshot>> {
    let layout = cfg.layout();
    let current_name = current
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let Some(path) = discovery::previous_by_name(&layout.history, CLEANED_PREFIX, &current_name)?
    else {
        return Ok(None);
    };

    info(format!("Previous weekly snapshot: {}", path.display()));
    let mut snapshot = csv_io::read_snapshot(&path, PREVIOUS_WEEKLY)?;
    snapshot.drop_blank_rows();
    Ok(Some(snapshot))
}
