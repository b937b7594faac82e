// src/store/csv_io.rs

use crate::errors::{AppError, AppResult};
use crate::models::diff::TAG_WEEKLY_VS_LIVE;
use crate::models::{ChangeType, DiffEntry, DiffRecord, Record, Snapshot, Value};
use indexmap::IndexMap;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

const OLD_SUFFIX: &str = "_old";
const NEW_SUFFIX: &str = "_new";

fn ensure_parent(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Read a CSV file into a snapshot. Every header becomes a column, every
/// cell a value (empty cells are absent). Short rows are padded with absent
/// values.
pub fn read_snapshot(path: &Path, label: &str) -> AppResult<Snapshot> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let columns: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let mut snapshot = Snapshot::new(label, columns.clone());

    for row in rdr.records() {
        let row = row?;
        let mut record = Record::new();
        for (i, col) in columns.iter().enumerate() {
            record.set(col.clone(), Value::from(row.get(i)));
        }
        snapshot.records.push(record);
    }

    Ok(snapshot)
}

/// Write a snapshot with its columns in order.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> AppResult<()> {
    ensure_parent(path)?;
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(&snapshot.columns)?;
    for record in &snapshot.records {
        wtr.write_record(snapshot.columns.iter().map(|c| record.value(c).to_cell()))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Header of a wide diff file for the given field layout.
pub fn wide_headers(layout: &[String]) -> Vec<String> {
    let mut headers = vec![
        "row_id".to_string(),
        "change_type".to_string(),
        "changed_fields".to_string(),
        "tag".to_string(),
    ];
    for f in layout {
        headers.push(format!("{f}{OLD_SUFFIX}"));
        headers.push(format!("{f}{NEW_SUFFIX}"));
    }
    headers
}

pub fn write_wide(path: &Path, records: &[DiffRecord], layout: &[String]) -> AppResult<()> {
    ensure_parent(path)?;
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(wide_headers(layout))?;
    for rec in records {
        let mut row = vec![
            rec.row_id.clone(),
            rec.change_type.as_str().to_string(),
            rec.changed_fields_display(),
            rec.tag.clone(),
        ];
        for f in layout {
            row.push(rec.old_value(f).to_cell());
            row.push(rec.new_value(f).to_cell());
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

fn header_position(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Parse a wide diff file back into diff records.
///
/// The field layout is recovered from `<field>_old` / `<field>_new` header
/// pairs; a header without its twin is ignored. Files without a `tag` column
/// hold canonical-against-weekly rows only.
pub fn read_wide(path: &Path) -> AppResult<Vec<DiffRecord>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();

    let missing: Vec<String> = ["row_id", "change_type", "changed_fields"]
        .into_iter()
        .filter(|h| header_position(&headers, h).is_none())
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::schema(format!("wide diff {}", path.display()), missing));
    }
    let id_pos = header_position(&headers, "row_id").unwrap_or_default();
    let type_pos = header_position(&headers, "change_type").unwrap_or_default();
    let fields_pos = header_position(&headers, "changed_fields").unwrap_or_default();
    let tag_pos = header_position(&headers, "tag");

    // field -> (old column, new column)
    let mut layout: IndexMap<String, (usize, usize)> = IndexMap::new();
    for (i, h) in headers.iter().enumerate() {
        if let Some(field) = h.strip_suffix(OLD_SUFFIX)
            && let Some(j) = header_position(&headers, &format!("{field}{NEW_SUFFIX}"))
        {
            layout.insert(field.to_string(), (i, j));
        }
    }

    let mut out = Vec::new();
    for (line, row) in rdr.records().enumerate() {
        let row = row?;
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let cell = |i: usize| row.get(i).unwrap_or("");

        let change_type = ChangeType::from_str_opt(cell(type_pos)).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "{}: line {}: unknown change_type '{}'",
                path.display(),
                line + 2,
                cell(type_pos)
            ))
        })?;

        let changed_fields = cell(fields_pos)
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();

        let mut old = IndexMap::new();
        let mut new = IndexMap::new();
        for (field, &(i, j)) in &layout {
            old.insert(field.clone(), Value::from_raw(cell(i)));
            new.insert(field.clone(), Value::from_raw(cell(j)));
        }

        out.push(DiffRecord {
            row_id: cell(id_pos).to_string(),
            change_type,
            changed_fields,
            tag: match tag_pos.map(cell) {
                Some(t) if !t.trim().is_empty() => t.trim().to_string(),
                _ => TAG_WEEKLY_VS_LIVE.to_string(),
            },
            old,
            new,
        });
    }

    Ok(out)
}

/// Long diff: `row_id, field, old, new, tag`.
pub fn write_long(path: &Path, entries: &[DiffEntry]) -> AppResult<()> {
    ensure_parent(path)?;
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["row_id", "field", "old", "new", "tag"])?;
    for e in entries {
        wtr.write_record([
            e.row_id.clone(),
            e.field.clone(),
            e.old.to_cell(),
            e.new.to_cell(),
            e.tag.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// JSON pretty-printed dump of any serializable diff structure.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> AppResult<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(data)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
