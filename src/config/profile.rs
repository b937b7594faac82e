//! Field profiles: which columns identify a record, which are compared and
//! which hold dates.
//!
//! Two presets exist. `legacy` matches the seven-column weekly
//! export, `extended` the case-tracking export. Both are plain data, stored in
//! the configuration file so the identity definition is always explicit.

use serde::{Deserialize, Serialize};

pub const LEGACY: &str = "legacy";
pub const EXTENDED: &str = "extended";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldProfile {
    #[serde(default = "default_profile_name")]
    pub name: String,
    /// Ordered list of fields concatenated into the row identity.
    pub identity_fields: Vec<String>,
    /// Fields whose values participate in change detection, in report order.
    pub comparison_fields: Vec<String>,
    /// Fields parsed as calendar dates before comparison.
    #[serde(default)]
    pub date_fields: Vec<String>,
    /// Columns a raw weekly file must carry.
    #[serde(default)]
    pub required_columns: Vec<String>,
    #[serde(default = "default_status_field")]
    pub status_field: String,
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_profile_name() -> String {
    "custom".to_string()
}
fn default_status_field() -> String {
    "status".to_string()
}
fn default_separator() -> String {
    "_".to_string()
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for FieldProfile {
    fn default() -> Self {
        Self::legacy()
    }
}

impl FieldProfile {
    pub fn legacy() -> Self {
        Self {
            name: LEGACY.to_string(),
            identity_fields: owned(&["name", "company"]),
            comparison_fields: owned(&["status", "nominator", "clearance_level", "date_cleared"]),
            date_fields: owned(&["date_submitted", "date_cleared"]),
            required_columns: owned(&[
                "name",
                "company",
                "status",
                "nominator",
                "clearance_level",
                "date_submitted",
                "date_cleared",
            ]),
            status_field: default_status_field(),
            separator: default_separator(),
        }
    }

    pub fn extended() -> Self {
        let compared = owned(&[
            "date_case_created",
            "case_status",
            "subject_name",
            "employee_type",
            "primary_position",
            "sector",
            "region",
            "nominee_personal_email_address",
            "requestor_name",
            "cisa_nominator_sponsor_email_address",
            "clearance_type",
            "clearance_status",
            "date_suitability_decision",
            "suitability_decision",
            "date_clearance_completed",
        ]);

        Self {
            name: EXTENDED.to_string(),
            identity_fields: owned(&["subject_name", "primary_position"]),
            required_columns: compared.clone(),
            comparison_fields: compared,
            date_fields: owned(&[
                "date_case_created",
                "date_suitability_decision",
                "date_clearance_completed",
            ]),
            status_field: "case_status".to_string(),
            separator: default_separator(),
        }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            LEGACY => Some(Self::legacy()),
            EXTENDED => Some(Self::extended()),
            _ => None,
        }
    }

    pub fn is_date_field(&self, field: &str) -> bool {
        self.date_fields.iter().any(|f| f == field)
    }

    pub fn is_comparison_field(&self, field: &str) -> bool {
        self.comparison_fields.iter().any(|f| f == field)
    }

    /// Fields carried as `_old`/`_new` pairs in the wide diff: identity
    /// fields first, then comparison fields, without repetition.
    pub fn wide_layout(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for f in self.identity_fields.iter().chain(&self.comparison_fields) {
            if !out.contains(f) {
                out.push(f.clone());
            }
        }
        out
    }

    /// Columns the canonical dataset must hold for a merge to be possible.
    pub fn canonical_columns(&self) -> Vec<String> {
        self.wide_layout()
    }

    /// Human-readable list of problems, empty when the profile is usable.
    pub fn check(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.identity_fields.is_empty() {
            issues.push("identity_fields is empty: every record would share one identity".into());
        }
        if self.comparison_fields.is_empty() {
            issues.push("comparison_fields is empty: no change can ever be detected".into());
        }
        if self.separator.is_empty() {
            issues.push("separator is empty: identities may collide".into());
        }
        for f in &self.date_fields {
            if !self.is_comparison_field(f) && !self.required_columns.contains(f) {
                issues.push(format!("date field '{f}' is neither compared nor required"));
            }
        }
        for f in self.identity_fields.iter().chain(&self.comparison_fields) {
            if !self.required_columns.is_empty() && !self.required_columns.contains(f) {
                issues.push(format!("field '{f}' is used but not listed in required_columns"));
            }
        }

        issues
    }
}
