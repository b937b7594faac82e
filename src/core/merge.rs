//! Apply approved changes to the canonical dataset.
//!
//! The merge works on an in-memory copy; persisting the result (backup then
//! write) is the job of `store::canonical::CanonicalStore::commit`.

use crate::config::FieldProfile;
use crate::core::diff::{identity_of, normalize_snapshot};
use crate::core::identity::index_by_id;
use crate::core::normalize::proper_case_status;
use crate::errors::{AppError, AppResult};
use crate::models::{ApprovalDecision, ChangeType, Record, Snapshot, Value};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub canonical: Snapshot,
    /// Identities whose fields were overwritten.
    pub updated: Vec<String>,
    /// Identities appended as new records.
    pub appended: Vec<String>,
    /// Approved identities that matched nothing (or already existed, for new
    /// records) and were left alone.
    pub ignored: Vec<String>,
}

impl MergeOutcome {
    /// Every identity that actually changed the canonical dataset.
    pub fn touched(&self) -> impl Iterator<Item = &String> {
        self.updated.iter().chain(&self.appended)
    }

    pub fn is_noop(&self) -> bool {
        self.updated.is_empty() && self.appended.is_empty()
    }
}

/// Fail with a schema error when `canonical` lacks identity or comparison
/// columns.
pub fn check_canonical_schema(canonical: &Snapshot, profile: &FieldProfile) -> AppResult<()> {
    let required = profile.canonical_columns();
    let missing = canonical.missing_columns(&required);
    if !missing.is_empty() {
        return Err(AppError::schema(format!("{} dataset", canonical.label), missing));
    }
    Ok(())
}

/// Merge approved decisions into a copy of `canonical`.
///
/// - value changes overwrite exactly the changed fields (plus overridden
///   ones) of the matching record; unknown identities are ignored,
/// - new records are projected onto identity and comparison fields and
///   appended unless their identity already exists,
/// - removed records never delete anything,
/// - rejected and deferred decisions are skipped.
///
/// The status field is title-cased on every record afterwards.
pub fn merge_approvals(
    canonical: &Snapshot,
    decisions: &[ApprovalDecision],
    profile: &FieldProfile,
) -> AppResult<MergeOutcome> {
    check_canonical_schema(canonical, profile)?;

    let mut out = canonical.clone();
    let keyed = normalize_snapshot(&out, profile);
    let mut index = index_by_id(&keyed, &profile.identity_fields, &profile.separator)?;

    let mut updated: Vec<String> = Vec::new();
    let mut appended: Vec<String> = Vec::new();
    let mut ignored: Vec<String> = Vec::new();

    for decision in decisions.iter().filter(|d| d.verdict.is_approved()) {
        let rid = &decision.record.row_id;

        match decision.record.change_type {
            ChangeType::ValueChanged => {
                let Some(&pos) = index.get(rid) else {
                    warn!(row_id = %rid, "approved change targets an unknown record");
                    ignored.push(rid.clone());
                    continue;
                };

                let record = &mut out.records[pos];
                for field in fields_to_apply(decision, profile) {
                    let value = decision.effective_value(&field);
                    record.set(field, value);
                }
                if !updated.contains(rid) {
                    updated.push(rid.clone());
                }
            }
            ChangeType::NewRecord => {
                let record = project_new_record(decision, &out.columns, profile);
                let new_id = identity_of(&record, profile);

                if index.contains_key(&new_id) {
                    warn!(row_id = %new_id, "approved new record already exists, not overwritten");
                    ignored.push(new_id);
                    continue;
                }

                index.insert(new_id.clone(), out.records.len());
                out.records.push(record);
                appended.push(new_id);
            }
            ChangeType::RemovedRecord => {
                ignored.push(rid.clone());
            }
        }
    }

    apply_status_case(&mut out, &profile.status_field);

    Ok(MergeOutcome {
        canonical: out,
        updated,
        appended,
        ignored,
    })
}

/// Changed fields plus overridden fields, limited to comparison fields, in
/// comparison order.
fn fields_to_apply(decision: &ApprovalDecision, profile: &FieldProfile) -> Vec<String> {
    let overrides = decision.verdict.overrides();
    profile
        .comparison_fields
        .iter()
        .filter(|f| {
            decision.record.changed_fields.contains(f)
                || overrides.is_some_and(|m| m.contains_key(f.as_str()))
        })
        .cloned()
        .collect()
}

/// Build a canonical record from the proposed side of a new-record decision.
/// Only identity and comparison fields are carried; other canonical columns
/// start absent.
fn project_new_record(
    decision: &ApprovalDecision,
    columns: &[String],
    profile: &FieldProfile,
) -> Record {
    let projected = profile.wide_layout();
    let mut record = Record::new();
    for col in columns {
        let value = if projected.contains(col) {
            decision.effective_value(col)
        } else {
            Value::Absent
        };
        record.set(col.clone(), value);
    }
    record
}

/// Reassert the title-cased status invariant over a whole snapshot.
pub fn apply_status_case(snapshot: &mut Snapshot, status_field: &str) {
    if !snapshot.has_column(status_field) {
        return;
    }
    for record in &mut snapshot.records {
        let cased = proper_case_status(record.value(status_field));
        record.set(status_field, Value::from_raw(&cased));
    }
}
