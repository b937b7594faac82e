use super::change_type::ChangeType;
use super::value::{ABSENT, Value};
use indexmap::IndexMap;
use serde::Serialize;

/// Sentinel field of long entries describing a whole-row event.
pub const ROW_SENTINEL: &str = "_row";
/// Marker used on the side of a `_row` entry where the record exists.
pub const PRESENT: &str = "present";

pub const TAG_WEEKLY_VS_LIVE: &str = "weekly_vs_live";
pub const TAG_WEEK_TO_WEEK: &str = "week_to_week";

/// Wide form: one row per changed identity.
///
/// `old` and `new` hold, for every field of the wide layout, the value found
/// on each side (absent where the record does not exist). `tag` names the
/// comparison the row came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffRecord {
    pub row_id: String,
    pub change_type: ChangeType,
    pub changed_fields: Vec<String>,
    pub tag: String,
    pub old: IndexMap<String, Value>,
    pub new: IndexMap<String, Value>,
}

impl DiffRecord {
    /// `changed_fields` as shown in files and prompts.
    pub fn changed_fields_display(&self) -> String {
        self.changed_fields.join(", ")
    }

    pub fn old_value(&self, field: &str) -> &Value {
        self.old.get(field).unwrap_or(&ABSENT)
    }

    pub fn new_value(&self, field: &str) -> &Value {
        self.new.get(field).unwrap_or(&ABSENT)
    }

    /// Rows of the canonical-against-weekly comparison are the only ones
    /// that can be merged back.
    pub fn is_live_change(&self) -> bool {
        self.tag == TAG_WEEKLY_VS_LIVE
    }

    /// Fields of the wide layout, in column order.
    pub fn layout(&self) -> impl Iterator<Item = &String> {
        self.old.keys()
    }
}

/// Long form: one row per changed (row_id, field) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffEntry {
    pub row_id: String,
    pub field: String,
    pub old: Value,
    pub new: Value,
    pub tag: String,
}

impl DiffEntry {
    pub fn is_row_event(&self) -> bool {
        self.field == ROW_SENTINEL
    }
}

/// Result of comparing two snapshots (or the concatenation of several runs).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiffOutput {
    pub wide: Vec<DiffRecord>,
    pub long: Vec<DiffEntry>,
}

impl DiffOutput {
    pub fn is_empty(&self) -> bool {
        self.wide.is_empty() && self.long.is_empty()
    }

    pub fn extend(&mut self, other: DiffOutput) {
        self.wide.extend(other.wide);
        self.long.extend(other.long);
    }

    pub fn count(&self, kind: ChangeType) -> usize {
        self.wide.iter().filter(|r| r.change_type == kind).count()
    }
}
