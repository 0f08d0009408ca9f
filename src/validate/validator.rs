//! Rule-set validation over JSON request bodies
//!
//! Validation semantics:
//! - Fields not named by any rule are ignored (whitelist posture)
//! - JSON `null` is treated as absent
//! - Create mode: required fields must be present and non-empty
//! - Patch mode: present-but-empty text is a patch skip, not a violation
//! - Entry-list violations carry indexed paths (`grades[1].credits`)
//!
//! The validator does not mutate bodies and never partially accepts one.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

use super::errors::Violation;
use super::rules::{FieldKind, FieldRule, RuleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create,
    Patch,
}

/// Validates a body for record creation.
pub fn validate_create(rules: &RuleSet, body: &Value) -> ApiResult<()> {
    validate(rules, body, Mode::Create)
}

/// Validates a body for a whitelisted-field patch.
pub fn validate_patch(rules: &RuleSet, body: &Value) -> ApiResult<()> {
    validate(rules, body, Mode::Patch)
}

fn validate(rules: &RuleSet, body: &Value, mode: Mode) -> ApiResult<()> {
    let mut violations = Vec::new();

    for rule in &rules.rules {
        let value = match body.get(rule.name) {
            Some(v) if !v.is_null() => v,
            _ => {
                if rule.required && mode == Mode::Create {
                    violations.push(required_violation(rule));
                }
                continue;
            }
        };

        // Present-but-empty text counts as absent in both modes.
        if matches!(rule.kind, FieldKind::Text)
            && value.as_str().map(str::trim).is_some_and(str::is_empty)
        {
            if rule.required && mode == Mode::Create {
                violations.push(required_violation(rule));
            }
            continue;
        }

        check_value(rule, value, rule.name, &mut violations);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ApiError::ValidationFailed(violations))
    }
}

fn required_violation(rule: &FieldRule) -> Violation {
    Violation::new(rule.name, format!("{} is required", rule.name))
}

fn check_value(rule: &FieldRule, value: &Value, path: &str, violations: &mut Vec<Violation>) {
    match &rule.kind {
        FieldKind::Text => {
            let Some(text) = value.as_str() else {
                violations.push(Violation::new(path, format!("{} must be a string", path)));
                return;
            };
            let text = text.trim();

            if let Some(min) = rule.min_length {
                if text.chars().count() < min {
                    violations.push(Violation::new(
                        path,
                        format!("{} must be at least {} characters", path, min),
                    ));
                    return;
                }
            }

            if let Some((regex, message)) = rule.format {
                if !regex.is_match(text) {
                    violations.push(Violation::new(path, message));
                    return;
                }
            }

            if let Some(allowed) = rule.one_of {
                if !allowed.contains(&text) {
                    violations.push(Violation::new(
                        path,
                        format!("{} must be one of: {}", path, allowed.join(", ")),
                    ));
                }
            }
        }
        FieldKind::Int => {
            let Some(n) = value.as_i64() else {
                violations.push(Violation::new(path, format!("{} must be an integer", path)));
                return;
            };
            check_bounds(rule, n as f64, path, violations);
        }
        FieldKind::Float => {
            let Some(n) = value.as_f64() else {
                violations.push(Violation::new(path, format!("{} must be a number", path)));
                return;
            };
            check_bounds(rule, n, path, violations);
        }
        FieldKind::Date => {
            let ok = value.as_str().map(|s| parse_date(s).is_some()).unwrap_or(false);
            if !ok {
                violations.push(Violation::new(
                    path,
                    format!("{} must be a date (YYYY-MM-DD or RFC 3339)", path),
                ));
            }
        }
        FieldKind::TextList => {
            let Some(items) = value.as_array() else {
                violations.push(Violation::new(
                    path,
                    format!("{} must be a list of strings", path),
                ));
                return;
            };
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    let elem_path = format!("{}[{}]", path, i);
                    violations.push(Violation::new(
                        elem_path.clone(),
                        format!("{} must be a string", elem_path),
                    ));
                }
            }
        }
        FieldKind::EntryList(entry_rules) => {
            let Some(items) = value.as_array() else {
                violations.push(Violation::new(path, format!("{} must be a list", path)));
                return;
            };
            for (i, item) in items.iter().enumerate() {
                let elem_path = format!("{}[{}]", path, i);
                let Some(obj) = item.as_object() else {
                    violations.push(Violation::new(
                        elem_path.clone(),
                        format!("{} must be an object", elem_path),
                    ));
                    continue;
                };
                for entry_rule in entry_rules {
                    if let Some(v) = obj.get(entry_rule.name) {
                        if !v.is_null() {
                            let entry_path = format!("{}.{}", elem_path, entry_rule.name);
                            check_value(entry_rule, v, &entry_path, violations);
                        }
                    }
                }
            }
        }
    }
}

fn check_bounds(rule: &FieldRule, n: f64, path: &str, violations: &mut Vec<Violation>) {
    if let Some((min, max)) = rule.bounds {
        if n < min || n > max {
            violations.push(Violation::new(
                path,
                format!("{} must be between {} and {}", path, min, max),
            ));
        }
    }
}

/// Parses an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    text.parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}

#[cfg(test)]
mod tests {
    use super::super::rules::EMAIL_FORMAT;
    use super::*;
    use serde_json::json;

    fn sample_rules() -> RuleSet {
        RuleSet::new(
            "sample",
            vec![
                FieldRule::required_text("firstName"),
                FieldRule::required_text("email")
                    .with_format(&EMAIL_FORMAT, "Please enter a valid email"),
                FieldRule::int("age").with_bounds(1.0, 150.0),
                FieldRule::text("status").one_of(&["active", "inactive", "graduated"]),
                FieldRule::date("enrollmentDate"),
                FieldRule::text_list("enrolledCourses"),
                FieldRule::entry_list(
                    "grades",
                    vec![
                        FieldRule::text("course"),
                        FieldRule::float("credits").with_bounds(0.0, 30.0),
                    ],
                ),
            ],
        )
    }

    fn violations(result: ApiResult<()>) -> Vec<Violation> {
        match result.unwrap_err() {
            ApiError::ValidationFailed(v) => v,
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_create_body_passes() {
        let body = json!({
            "firstName": "Alice",
            "email": "alice@example.com",
            "age": 20,
            "status": "active"
        });
        assert!(sample_rules().validate_create(&body).is_ok());
    }

    #[test]
    fn test_missing_required_field_on_create() {
        let body = json!({ "email": "alice@example.com" });
        let v = violations(sample_rules().validate_create(&body));
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].field, "firstName");
        assert_eq!(v[0].message, "firstName is required");
    }

    #[test]
    fn test_empty_required_text_on_create() {
        let body = json!({ "firstName": "   ", "email": "alice@example.com" });
        let v = violations(sample_rules().validate_create(&body));
        assert_eq!(v[0].field, "firstName");
    }

    #[test]
    fn test_null_is_treated_as_absent() {
        let body = json!({ "firstName": null, "email": "alice@example.com" });
        let v = violations(sample_rules().validate_create(&body));
        assert_eq!(v[0].field, "firstName");

        // In patch mode null is simply skipped
        assert!(sample_rules().validate_patch(&body).is_ok());
    }

    #[test]
    fn test_patch_skips_absent_and_empty_fields() {
        let body = json!({ "firstName": "" });
        assert!(sample_rules().validate_patch(&body).is_ok());
        assert!(sample_rules().validate_patch(&json!({})).is_ok());
    }

    #[test]
    fn test_patch_still_checks_present_values() {
        let body = json!({ "email": "not-an-email" });
        let v = violations(sample_rules().validate_patch(&body));
        assert_eq!(v[0].field, "email");
        assert_eq!(v[0].message, "Please enter a valid email");
    }

    #[test]
    fn test_out_of_bounds_integer() {
        let body = json!({ "age": 200 });
        let v = violations(sample_rules().validate_patch(&body));
        assert_eq!(v[0].field, "age");
        assert_eq!(v[0].message, "age must be between 1 and 150");
    }

    #[test]
    fn test_enum_membership() {
        let body = json!({ "status": "expelled" });
        let v = violations(sample_rules().validate_patch(&body));
        assert_eq!(v[0].field, "status");
        assert!(v[0].message.contains("active, inactive, graduated"));
    }

    #[test]
    fn test_type_mismatch() {
        let body = json!({ "firstName": 42, "email": "alice@example.com" });
        let v = violations(sample_rules().validate_create(&body));
        assert_eq!(v[0].message, "firstName must be a string");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let body = json!({
            "firstName": "Alice",
            "email": "alice@example.com",
            "isAdmin": true,
            "createdAt": "1970-01-01"
        });
        assert!(sample_rules().validate_create(&body).is_ok());
    }

    #[test]
    fn test_violations_reported_in_rule_order() {
        let body = json!({ "email": "bad", "age": 0 });
        let v = violations(sample_rules().validate_create(&body));
        let fields: Vec<&str> = v.iter().map(|x| x.field.as_str()).collect();
        assert_eq!(fields, vec!["firstName", "email", "age"]);
    }

    #[test]
    fn test_text_list_element_paths() {
        let body = json!({ "enrolledCourses": ["CS101", 7] });
        let v = violations(sample_rules().validate_patch(&body));
        assert_eq!(v[0].field, "enrolledCourses[1]");
    }

    #[test]
    fn test_entry_list_indexed_paths() {
        let body = json!({
            "grades": [
                { "course": "CS101", "credits": 4 },
                { "course": "CS102", "credits": 99 }
            ]
        });
        let v = violations(sample_rules().validate_patch(&body));
        assert_eq!(v[0].field, "grades[1].credits");
    }

    #[test]
    fn test_entry_list_rejects_non_objects() {
        let body = json!({ "grades": ["CS101"] });
        let v = violations(sample_rules().validate_patch(&body));
        assert_eq!(v[0].field, "grades[0]");
    }

    #[test]
    fn test_date_formats() {
        assert!(sample_rules()
            .validate_patch(&json!({ "enrollmentDate": "2024-09-01" }))
            .is_ok());
        assert!(sample_rules()
            .validate_patch(&json!({ "enrollmentDate": "2024-09-01T08:30:00Z" }))
            .is_ok());
        let v = violations(
            sample_rules().validate_patch(&json!({ "enrollmentDate": "next tuesday" })),
        );
        assert_eq!(v[0].field, "enrollmentDate");
    }

    #[test]
    fn test_parse_date() {
        let d = parse_date("2024-09-01").unwrap();
        assert_eq!(d.to_rfc3339(), "2024-09-01T00:00:00+00:00");
        assert!(parse_date("2024-09-01T08:30:00+02:00").is_some());
        assert!(parse_date("garbage").is_none());
    }
}
