//! Snapshot comparison.
//!
//! Both sides are normalized first, then joined on row identity with a full
//! outer join: the old side is indexed by row_id and probed with every new
//! record. Each identity ends up in exactly one bucket (new only, old only,
//! both) and only the `both` bucket is compared field by field.

use crate::config::FieldProfile;
use crate::core::identity::{build_row_id, index_by_id};
use crate::core::normalize::{date_value, text_value};
use crate::errors::AppResult;
use crate::models::diff::{PRESENT, ROW_SENTINEL};
use crate::models::{ChangeType, DiffEntry, DiffOutput, DiffRecord, Record, Snapshot, Value};
use indexmap::IndexMap;
use tracing::debug;

/// Compare `old` against `new` over the profile's comparison fields.
///
/// Fails only when identities collide inside one of the snapshots.
pub fn diff(
    old: &Snapshot,
    new: &Snapshot,
    profile: &FieldProfile,
    tag: &str,
) -> AppResult<DiffOutput> {
    let old = normalize_snapshot(old, profile);
    let new = normalize_snapshot(new, profile);

    let ids = &profile.identity_fields;
    let sep = profile.separator.as_str();
    let old_idx = index_by_id(&old, ids, sep)?;
    let new_idx = index_by_id(&new, ids, sep)?;

    let layout = profile.wide_layout();
    let compared: Vec<&String> = profile.comparison_fields.iter().collect();

    let mut added = Vec::new();
    let mut removed = Vec::new();
    let mut changed = Vec::new();

    for (rid, &npos) in &new_idx {
        let new_rec = &new.records[npos];
        match old_idx.get(rid) {
            None => {
                let fields = present_fields(&compared, &new, new_rec);
                added.push(wide_row(
                    &layout,
                    tag,
                    rid,
                    ChangeType::NewRecord,
                    fields,
                    None,
                    Some(new_rec),
                ));
            }
            Some(&opos) => {
                let old_rec = &old.records[opos];
                let fields = differing_fields(&compared, &old, old_rec, &new, new_rec);
                if !fields.is_empty() {
                    changed.push(wide_row(
                        &layout,
                        tag,
                        rid,
                        ChangeType::ValueChanged,
                        fields,
                        Some(old_rec),
                        Some(new_rec),
                    ));
                }
            }
        }
    }

    for (rid, &opos) in &old_idx {
        if new_idx.contains_key(rid) {
            continue;
        }
        let old_rec = &old.records[opos];
        let fields = present_fields(&compared, &old, old_rec);
        removed.push(wide_row(
            &layout,
            tag,
            rid,
            ChangeType::RemovedRecord,
            fields,
            Some(old_rec),
            None,
        ));
    }

    debug!(
        tag,
        old = old.len(),
        new = new.len(),
        added = added.len(),
        removed = removed.len(),
        changed = changed.len(),
        "snapshot comparison finished"
    );

    let wide: Vec<DiffRecord> = added.into_iter().chain(removed).chain(changed).collect();
    let long = long_entries(&wide, tag);

    Ok(DiffOutput { wide, long })
}

/// Copy of `snapshot` with date fields parsed to calendar dates and
/// comparison text fields trimmed and lowercased.
pub fn normalize_snapshot(snapshot: &Snapshot, profile: &FieldProfile) -> Snapshot {
    let mut out = snapshot.clone();
    for record in &mut out.records {
        normalize_record(record, profile);
    }
    out
}

fn normalize_record(record: &mut Record, profile: &FieldProfile) {
    for (field, value) in record.values_mut() {
        if profile.is_date_field(field) {
            *value = date_value(value);
        } else if profile.is_comparison_field(field) {
            *value = text_value(value);
        }
    }
}

/// Absent on both sides is equal, absent on one side is a difference,
/// anything else compares the normalized values.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.is_absent(), b.is_absent()) {
        (true, true) => true,
        (false, false) => a == b,
        _ => false,
    }
}

fn differing_fields(
    compared: &[&String],
    old: &Snapshot,
    old_rec: &Record,
    new: &Snapshot,
    new_rec: &Record,
) -> Vec<String> {
    compared
        .iter()
        .filter(|f| old.has_column(f) && new.has_column(f))
        .filter(|f| !values_equal(old_rec.value(f), new_rec.value(f)))
        .map(|f| f.to_string())
        .collect()
}

/// For one-sided rows: the compared fields holding a value on the side
/// where the record exists.
fn present_fields(compared: &[&String], snapshot: &Snapshot, record: &Record) -> Vec<String> {
    compared
        .iter()
        .filter(|f| snapshot.has_column(f) && record.value(f).is_present())
        .map(|f| f.to_string())
        .collect()
}

fn side_values(layout: &[String], record: Option<&Record>) -> IndexMap<String, Value> {
    layout
        .iter()
        .map(|f| {
            let v = record.map(|r| r.value(f).clone()).unwrap_or_default();
            (f.clone(), v)
        })
        .collect()
}

fn wide_row(
    layout: &[String],
    tag: &str,
    row_id: &str,
    change_type: ChangeType,
    changed_fields: Vec<String>,
    old: Option<&Record>,
    new: Option<&Record>,
) -> DiffRecord {
    DiffRecord {
        row_id: row_id.to_string(),
        change_type,
        changed_fields,
        tag: tag.to_string(),
        old: side_values(layout, old),
        new: side_values(layout, new),
    }
}

/// Long form of a wide diff: one entry per changed field, or a single
/// `_row` entry for a record that exists on one side only.
pub fn long_entries(wide: &[DiffRecord], tag: &str) -> Vec<DiffEntry> {
    let mut out = Vec::new();

    for rec in wide {
        match rec.change_type {
            ChangeType::NewRecord => out.push(DiffEntry {
                row_id: rec.row_id.clone(),
                field: ROW_SENTINEL.to_string(),
                old: Value::Absent,
                new: Value::text(PRESENT),
                tag: tag.to_string(),
            }),
            ChangeType::RemovedRecord => out.push(DiffEntry {
                row_id: rec.row_id.clone(),
                field: ROW_SENTINEL.to_string(),
                old: Value::text(PRESENT),
                new: Value::Absent,
                tag: tag.to_string(),
            }),
            ChangeType::ValueChanged => {
                for field in &rec.changed_fields {
                    out.push(DiffEntry {
                        row_id: rec.row_id.clone(),
                        field: field.clone(),
                        old: rec.old_value(field).clone(),
                        new: rec.new_value(field).clone(),
                        tag: tag.to_string(),
                    });
                }
            }
        }
    }

    out
}

/// Row identity of a raw record, computed exactly as the diff engine does
/// (normalization first).
pub fn identity_of(record: &Record, profile: &FieldProfile) -> String {
    let mut keyed = record.clone();
    normalize_record(&mut keyed, profile);
    build_row_id(&keyed, &profile.identity_fields, &profile.separator)
}
