//! Row identity: the key used to match one record across two snapshots.

use crate::core::normalize::normalize_text;
use crate::errors::{AppError, AppResult};
use crate::models::{Record, Snapshot};
use indexmap::IndexMap;

/// Concatenate the normalized identity fields of `record`.
///
/// A missing identity column reads as an empty string, so the result is
/// always defined (`"alice_"` for a record without a company).
pub fn build_row_id(record: &Record, identity_fields: &[String], separator: &str) -> String {
    identity_fields
        .iter()
        .map(|f| normalize_text(record.value(f)))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Row identities of every record, in snapshot order.
pub fn row_ids(snapshot: &Snapshot, identity_fields: &[String], separator: &str) -> Vec<String> {
    snapshot
        .records
        .iter()
        .map(|r| build_row_id(r, identity_fields, separator))
        .collect()
}

/// Fail when two records of `snapshot` share an identity.
///
/// The error lists every duplicated id once, in order of first appearance.
pub fn assert_unique_ids(
    snapshot: &Snapshot,
    identity_fields: &[String],
    separator: &str,
) -> AppResult<()> {
    index_by_id(snapshot, identity_fields, separator).map(|_| ())
}

/// Map row_id → position in `snapshot.records`, rejecting collisions.
pub fn index_by_id(
    snapshot: &Snapshot,
    identity_fields: &[String],
    separator: &str,
) -> AppResult<IndexMap<String, usize>> {
    let mut index: IndexMap<String, usize> = IndexMap::with_capacity(snapshot.len());
    let mut duplicates: Vec<String> = Vec::new();

    for (pos, rid) in row_ids(snapshot, identity_fields, separator)
        .into_iter()
        .enumerate()
    {
        if index.contains_key(&rid) {
            if !duplicates.contains(&rid) {
                duplicates.push(rid);
            }
            continue;
        }
        index.insert(rid, pos);
    }

    if !duplicates.is_empty() {
        return Err(AppError::DuplicateIdentity {
            snapshot: snapshot.label.clone(),
            ids: duplicates,
        });
    }

    Ok(index)
}
