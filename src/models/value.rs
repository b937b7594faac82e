use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

/// A single cell of a snapshot.
///
/// Empty, null-like and whitespace-only cells are all `Absent`; two absent
/// cells always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    #[default]
    Absent,
    Text(String),
    Date(NaiveDate),
}

/// Shared absent value handed out for missing fields.
pub static ABSENT: Value = Value::Absent;

impl Value {
    /// Build a value from a raw CSV cell.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Value::Absent
        } else {
            Value::Text(raw.to_string())
        }
    }

    pub fn text<S: Into<String>>(s: S) -> Self {
        Value::from_raw(&s.into())
    }

    pub fn is_absent(&self) -> bool {
        match self {
            Value::Absent => true,
            Value::Text(s) => s.trim().is_empty(),
            Value::Date(_) => false,
        }
    }

    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    /// Cell representation used when writing CSV files.
    pub fn to_cell(&self) -> String {
        match self {
            Value::Absent => String::new(),
            Value::Text(s) => s.clone(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => Ok(()),
            Value::Text(s) => write!(f, "{s}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::from_raw(s)
    }
}

impl From<Option<&str>> for Value {
    fn from(s: Option<&str>) -> Self {
        s.map(Value::from_raw).unwrap_or(Value::Absent)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

/// Absent cells serialize as `null` so JSON exports keep the distinction.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Absent => serializer.serialize_none(),
            other => serializer.serialize_str(&other.to_cell()),
        }
    }
}
