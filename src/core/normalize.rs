//! Canonical forms for raw cell values.
//!
//! Everything here is total: no function fails, bad input degrades to an
//! empty string or to `None`.

use crate::models::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-only layouts, tried in order.
/// US layouts come before `%Y/%m/%d`, which would read `03/10/24` as year 3.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%Y%m%d",
];

/// Date-time layouts, tried in order. The time of day is dropped.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

/// Trim and lowercase; absent input yields an empty string.
pub fn normalize_text(v: &Value) -> String {
    match v {
        Value::Absent => String::new(),
        Value::Text(s) => s.trim().to_lowercase(),
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
    }
}

/// Parse a textual date or timestamp down to its calendar day.
///
/// Unparsable input is absent, never an error: `2024-03-10 00:00:00` and
/// `2024-03-10` both become the same date.
pub fn normalize_date(v: &Value) -> Option<NaiveDate> {
    match v {
        Value::Absent => None,
        Value::Date(d) => Some(*d),
        Value::Text(s) => parse_lenient(s.trim()),
    }
}

fn parse_lenient(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%z") {
        return Some(dt.date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    None
}

/// `normalize_date` lifted back into a cell value.
pub fn date_value(v: &Value) -> Value {
    normalize_date(v).map(Value::Date).unwrap_or(Value::Absent)
}

/// `normalize_text` lifted back into a cell value.
pub fn text_value(v: &Value) -> Value {
    Value::from_raw(&normalize_text(v))
}

/// Title-case a status: the first letter of each alphabetic run goes upper
/// case, the rest lower case (`pending REVIEW` → `Pending Review`).
///
/// Absent input comes back as its string form, the empty string.
pub fn proper_case_status(v: &Value) -> String {
    title_case(&v.to_cell())
}

pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;

    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }

    out
}
