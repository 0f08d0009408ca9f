//! # Student Record
//!
//! The roster document and its validation rule set. Wire field names are
//! camelCase; id and the created/updated timestamps are store-assigned and
//! never caller-settable.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{FieldRule, RuleSet, EMAIL_FORMAT};

/// Enrollment status, a closed enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Graduated,
}

impl StudentStatus {
    pub const VALUES: &'static [&'static str] = &["active", "inactive", "graduated"];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Inactive => "inactive",
            StudentStatus::Graduated => "graduated",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(StudentStatus::Active),
            "inactive" => Some(StudentStatus::Inactive),
            "graduated" => Some(StudentStatus::Graduated),
            _ => None,
        }
    }
}

/// Roster record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique identifier, store-assigned
    pub id: Uuid,

    pub first_name: String,

    pub last_name: String,

    /// Lowercased, unique across all students
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Caller-settable domain date, defaults to now at creation
    pub enrollment_date: DateTime<Utc>,

    pub status: StudentStatus,

    /// Store-assigned, immutable
    pub created_at: DateTime<Utc>,

    /// Store-assigned, refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

static STUDENT_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        "student",
        vec![
            FieldRule::required_text("firstName"),
            FieldRule::required_text("lastName"),
            FieldRule::required_text("email")
                .with_format(&EMAIL_FORMAT, "Please enter a valid email"),
            FieldRule::int("age").with_bounds(1.0, 150.0),
            FieldRule::text("grade"),
            FieldRule::text("course"),
            FieldRule::text("phone"),
            FieldRule::text("address"),
            FieldRule::date("enrollmentDate"),
            FieldRule::text("status").one_of(StudentStatus::VALUES),
        ],
    )
});

/// Rule set shared by roster create and update
pub fn student_rules() -> &'static RuleSet {
    &STUDENT_RULES
}
