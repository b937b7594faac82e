//! Raw weekly file ingestion: header normalization, schema check and cell
//! cleanup before a snapshot enters the pipeline.

use crate::config::FieldProfile;
use crate::core::merge::apply_status_case;
use crate::core::normalize::date_value;
use crate::errors::{AppError, AppResult};
use crate::models::{Record, Snapshot};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static HEADER_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s/]+").expect("valid header pattern"));

#[derive(Debug, Clone)]
pub struct CleanReport {
    pub snapshot: Snapshot,
    /// Columns present in the file but not expected by the profile.
    pub extra_columns: Vec<String>,
    /// Rows dropped because every cell was empty.
    pub dropped_rows: usize,
}

/// `" Date Submitted "` → `"date_submitted"`; slashes count as spaces.
pub fn normalize_header(h: &str) -> String {
    let lowered = h.trim().to_lowercase();
    HEADER_SEPARATORS
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// Fail on missing required columns; return the unexpected ones.
pub fn check_schema(snapshot: &Snapshot, profile: &FieldProfile) -> AppResult<Vec<String>> {
    let missing = snapshot.missing_columns(&profile.required_columns);
    if !missing.is_empty() {
        return Err(AppError::schema(format!("{} file", snapshot.label), missing));
    }

    let expected: Vec<String> = profile
        .required_columns
        .iter()
        .chain(&profile.wide_layout())
        .cloned()
        .collect();

    Ok(snapshot
        .columns
        .iter()
        .filter(|c| !expected.contains(c))
        .cloned()
        .collect())
}

/// Rename every column through `normalize_header`.
pub fn normalize_headers(raw: Snapshot) -> AppResult<Snapshot> {
    let renamed: Vec<String> = raw.columns.iter().map(|c| normalize_header(c)).collect();

    let mut seen: Vec<&String> = Vec::new();
    for c in &renamed {
        if seen.contains(&c) {
            return Err(AppError::InvalidInput(format!(
                "column '{c}' appears more than once after header normalization"
            )));
        }
        seen.push(c);
    }

    let mut out = Snapshot::new(raw.label.clone(), renamed.clone());
    out.captured_at = raw.captured_at;
    for record in raw.records {
        let mut rekeyed = Record::new();
        for (old_name, new_name) in raw.columns.iter().zip(&renamed) {
            rekeyed.set(new_name.clone(), record.value(old_name).clone());
        }
        out.records.push(rekeyed);
    }
    Ok(out)
}

/// Turn a raw weekly snapshot into a cleaned one.
///
/// Fails before touching any data when a required column is missing; extra
/// columns are kept and reported.
pub fn clean_raw(raw: Snapshot, profile: &FieldProfile) -> AppResult<CleanReport> {
    let mut snapshot = normalize_headers(raw)?;

    let extra_columns = check_schema(&snapshot, profile)?;
    if !extra_columns.is_empty() {
        warn!(columns = ?extra_columns, "raw file has columns outside the expected schema");
    }

    let dropped_rows = snapshot.drop_blank_rows();

    for record in &mut snapshot.records {
        for (field, value) in record.values_mut() {
            if profile.is_date_field(field) {
                *value = date_value(value);
            }
        }
    }

    apply_status_case(&mut snapshot, &profile.status_field);

    Ok(CleanReport {
        snapshot,
        extra_columns,
        dropped_rows,
    })
}
