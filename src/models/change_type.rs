use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    NewRecord,
    RemovedRecord,
    ValueChanged,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::NewRecord => "new_record",
            ChangeType::RemovedRecord => "removed_record",
            ChangeType::ValueChanged => "value_changed",
        }
    }

    /// Parse the `change_type` column of a wide diff file.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "new_record" => Some(ChangeType::NewRecord),
            "removed_record" => Some(ChangeType::RemovedRecord),
            "value_changed" => Some(ChangeType::ValueChanged),
            _ => None,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, ChangeType::NewRecord)
    }

    pub fn is_removed(&self) -> bool {
        matches!(self, ChangeType::RemovedRecord)
    }
}
