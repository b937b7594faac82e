use super::diff::DiffRecord;
use super::value::Value;
use indexmap::IndexMap;

/// Outcome of reviewing one wide diff row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    /// Approved, with replacement values for some fields.
    ApprovedWithOverride(IndexMap<String, String>),
    Rejected,
    /// Not looked at (the reviewer chose to skip the remaining rows).
    Deferred,
}

impl Verdict {
    pub fn is_approved(&self) -> bool {
        matches!(self, Verdict::Approved | Verdict::ApprovedWithOverride(_))
    }

    pub fn overrides(&self) -> Option<&IndexMap<String, String>> {
        match self {
            Verdict::ApprovedWithOverride(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::ApprovedWithOverride(_) => "override",
            Verdict::Rejected => "rejected",
            Verdict::Deferred => "deferred",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalDecision {
    pub record: DiffRecord,
    pub verdict: Verdict,
}

impl ApprovalDecision {
    pub fn new(record: DiffRecord, verdict: Verdict) -> Self {
        Self { record, verdict }
    }

    pub fn approved(record: DiffRecord) -> Self {
        Self::new(record, Verdict::Approved)
    }

    /// Value the canonical dataset should receive for `field`: the override
    /// when one was given, the proposed `_new` value otherwise.
    pub fn effective_value(&self, field: &str) -> Value {
        if let Some(v) = self.verdict.overrides().and_then(|m| m.get(field)) {
            return Value::from_raw(v.trim());
        }
        self.record.new_value(field).clone()
    }

    /// The wide row with overrides folded into its `_new` side, as written to
    /// the approved-changes file.
    pub fn resolved_record(&self) -> DiffRecord {
        let mut rec = self.record.clone();
        if let Some(map) = self.verdict.overrides() {
            for (field, v) in map {
                rec.new.insert(field.clone(), Value::from_raw(v.trim()));
            }
        }
        rec
    }
}
