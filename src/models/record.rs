use super::value::{ABSENT, Value};
use indexmap::IndexMap;
use serde::Serialize;

/// Ordered mapping field name → value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor used by ingestion and tests.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut record = Record::new();
        for (k, v) in pairs {
            record.set(k, v.into());
        }
        record
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Value of a field, treating a missing column as absent.
    pub fn value(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&ABSENT)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn set<K: Into<String>>(&mut self, field: K, value: Value) {
        self.fields.insert(field.into(), value);
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = (&String, &mut Value)> {
        self.fields.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when every cell is absent (blank CSV line with separators only).
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(Value::is_absent)
    }
}
