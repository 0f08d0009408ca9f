//! Typed accessors over validated JSON bodies
//!
//! These implement the patch-merge reading convention shared by every
//! mutation pipeline: strings are trimmed and empty means absent, numbers
//! and dates apply when present, `null` is absent everywhere.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::validator::parse_date;

/// Trimmed, non-empty text value of a field, if present.
pub fn text_field(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Integer value of a field, if present.
pub fn int_field(body: &Value, key: &str) -> Option<i64> {
    body.get(key).and_then(Value::as_i64)
}

/// Numeric value of a field, if present.
pub fn float_field(body: &Value, key: &str) -> Option<f64> {
    body.get(key).and_then(Value::as_f64)
}

/// Date value of a field, if present and parseable.
pub fn date_field(body: &Value, key: &str) -> Option<DateTime<Utc>> {
    body.get(key).and_then(Value::as_str).and_then(parse_date)
}

/// List-of-text value of a field, if present. An empty list is a
/// deliberate clear, so `Some(vec![])` is distinct from `None`.
pub fn string_list_field(body: &Value, key: &str) -> Option<Vec<String>> {
    body.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}
