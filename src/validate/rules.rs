//! Declarative field rules
//!
//! A `RuleSet` is a named, ordered list of `FieldRule`s describing what a
//! record type accepts in a request body. Construction-helper style keeps
//! rule declarations readable at the call site.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::ApiResult;

use super::validator;

/// Email format shared by roster and portal records
pub static EMAIL_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email regex"));

/// Shape a field's value must have
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// UTF-8 text, trimmed before checks
    Text,
    /// Integer
    Int,
    /// Number (integer or float)
    Float,
    /// RFC 3339 timestamp or plain `YYYY-MM-DD`
    Date,
    /// Homogeneous list of text values
    TextList,
    /// List of objects, each checked against nested rules
    EntryList(Vec<FieldRule>),
}

/// A single declarative field rule
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Wire name of the field (camelCase)
    pub name: &'static str,
    pub kind: FieldKind,
    /// Required fields must be present and non-empty on create
    pub required: bool,
    /// Format regex with its violation message (text fields only)
    pub format: Option<(&'static Regex, &'static str)>,
    /// Inclusive numeric bounds
    pub bounds: Option<(f64, f64)>,
    /// Closed enumeration of accepted values (text fields only)
    pub one_of: Option<&'static [&'static str]>,
    /// Minimum length in characters (text fields only)
    pub min_length: Option<usize>,
}

impl FieldRule {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            format: None,
            bounds: None,
            one_of: None,
            min_length: None,
        }
    }

    /// Optional text field
    pub fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// Required text field
    pub fn required_text(name: &'static str) -> Self {
        let mut rule = Self::new(name, FieldKind::Text);
        rule.required = true;
        rule
    }

    /// Optional integer field
    pub fn int(name: &'static str) -> Self {
        Self::new(name, FieldKind::Int)
    }

    /// Optional numeric field
    pub fn float(name: &'static str) -> Self {
        Self::new(name, FieldKind::Float)
    }

    /// Optional date field
    pub fn date(name: &'static str) -> Self {
        Self::new(name, FieldKind::Date)
    }

    /// Optional list-of-text field
    pub fn text_list(name: &'static str) -> Self {
        Self::new(name, FieldKind::TextList)
    }

    /// Optional list-of-entries field with nested rules
    pub fn entry_list(name: &'static str, rules: Vec<FieldRule>) -> Self {
        Self::new(name, FieldKind::EntryList(rules))
    }

    /// Attach a format regex with its violation message
    pub fn with_format(mut self, regex: &'static Regex, message: &'static str) -> Self {
        self.format = Some((regex, message));
        self
    }

    /// Attach inclusive numeric bounds
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.bounds = Some((min, max));
        self
    }

    /// Restrict to a closed enumeration
    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.one_of = Some(allowed);
        self
    }

    /// Require a minimum length in characters
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }
}

/// Named, ordered rule set for one record type
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub name: &'static str,
    pub rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new(name: &'static str, rules: Vec<FieldRule>) -> Self {
        Self { name, rules }
    }

    /// Validate a create body: required fields must be present and
    /// non-empty; all present fields must satisfy their rule.
    pub fn validate_create(&self, body: &Value) -> ApiResult<()> {
        validator::validate_create(self, body)
    }

    /// Validate a patch body: absent fields are fine; present-and-empty
    /// text is treated as absent; present values must satisfy their rule.
    pub fn validate_patch(&self, body: &Value) -> ApiResult<()> {
        validator::validate_patch(self, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_builders() {
        let rule = FieldRule::required_text("email")
            .with_format(&EMAIL_FORMAT, "Please enter a valid email");
        assert!(rule.required);
        assert!(rule.format.is_some());

        let rule = FieldRule::int("age").with_bounds(1.0, 150.0);
        assert!(!rule.required);
        assert_eq!(rule.bounds, Some((1.0, 150.0)));
    }

    #[test]
    fn test_email_format() {
        assert!(EMAIL_FORMAT.is_match("alice@example.com"));
        assert!(!EMAIL_FORMAT.is_match("not-an-email"));
        assert!(!EMAIL_FORMAT.is_match("missing@tld"));
        assert!(!EMAIL_FORMAT.is_match("spaces in@example.com"));
    }
}
