use super::record::Record;
use chrono::{DateTime, Local};

/// Source labels used across the pipeline.
pub const LIVE: &str = "live";
pub const WEEKLY: &str = "weekly";
pub const PREVIOUS_WEEKLY: &str = "previous-weekly";

/// One captured version of a record set.
///
/// All records share `columns`; a record never carries a field that is not
/// listed there, while a listed field may be missing from a record built by
/// hand (it then reads as absent).
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub label: String,
    pub captured_at: DateTime<Local>,
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Snapshot {
    pub fn new<S: Into<String>>(label: S, columns: Vec<String>) -> Self {
        Self {
            label: label.into(),
            captured_at: Local::now(),
            columns,
            records: Vec::new(),
        }
    }

    /// Build a snapshot from records, deriving the column list from the
    /// union of their fields in first-seen order.
    pub fn from_records<S: Into<String>>(label: S, records: Vec<Record>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for r in &records {
            for (k, _) in r.fields() {
                if !columns.iter().any(|c| c == k) {
                    columns.push(k.clone());
                }
            }
        }
        Self {
            label: label.into(),
            captured_at: Local::now(),
            columns,
            records,
        }
    }

    pub fn has_column(&self, field: &str) -> bool {
        self.columns.iter().any(|c| c == field)
    }

    /// Columns from `required` that this snapshot lacks, in the given order.
    pub fn missing_columns<'a, I>(&self, required: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        required
            .into_iter()
            .filter(|c| !self.has_column(c))
            .cloned()
            .collect()
    }

    pub fn push(&mut self, record: Record) {
        for (k, _) in record.fields() {
            if !self.has_column(k) {
                self.columns.push(k.clone());
            }
        }
        self.records.push(record);
    }

    /// Remove records whose cells are all absent; returns how many went.
    pub fn drop_blank_rows(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !r.is_blank());
        before - self.records.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn relabel<S: Into<String>>(mut self, label: S) -> Self {
        self.label = label.into();
        self
    }
}
