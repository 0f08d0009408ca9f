//! # Roster Mutation Pipeline
//!
//! validate -> resolve -> whitelisted merge -> persist. Only fields
//! present and non-empty in a request body are merged (patch semantics,
//! never replace); server-assigned fields are not settable by callers; a
//! validation failure leaves storage untouched.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::validate::{date_field, int_field, text_field};

use super::query::{self, StudentQuery};
use super::record::{student_rules, Student, StudentStatus};
use super::sample::sample_students;
use super::store::StudentStore;

/// Roster service combining store, validator, and query pipeline
pub struct RosterService<S: StudentStore> {
    store: Arc<S>,
}

impl<S: StudentStore> RosterService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All matching students, filtered and ordered per the query
    pub fn list(&self, query: &StudentQuery) -> ApiResult<Vec<Student>> {
        let students = self.store.find_all()?;
        query::filter_and_sort(students, query)
    }

    /// Single student by id
    pub fn get(&self, id: Uuid) -> ApiResult<Student> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound("Student".to_string()))
    }

    /// Creates a student from a request body. Assigns id and timestamps,
    /// applies defaults, lowercases the email. `Conflict` on duplicate
    /// email.
    pub fn create(&self, body: &Value) -> ApiResult<Student> {
        student_rules().validate_create(body)?;

        let email = required_text(body, "email")?.to_lowercase();
        if self.store.email_taken(&email, None)? {
            return Err(ApiError::Conflict("Email already exists".to_string()));
        }

        let now = Utc::now();
        let student = Student {
            id: Uuid::new_v4(),
            first_name: required_text(body, "firstName")?,
            last_name: required_text(body, "lastName")?,
            email,
            age: int_field(body, "age").map(|n| n as u32),
            grade: text_field(body, "grade"),
            course: text_field(body, "course"),
            phone: text_field(body, "phone"),
            address: text_field(body, "address"),
            enrollment_date: date_field(body, "enrollmentDate").unwrap_or(now),
            status: status_field(body).unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        self.store.insert(&student)?;
        Ok(student)
    }

    /// Patches a student. Absent and empty fields are left untouched;
    /// `Conflict` if a new email collides with another record. Returns the
    /// full post-update record.
    pub fn update(&self, id: Uuid, body: &Value) -> ApiResult<Student> {
        student_rules().validate_patch(body)?;

        let mut student = self.get(id)?;

        if let Some(email) = text_field(body, "email") {
            let email = email.to_lowercase();
            if self.store.email_taken(&email, Some(id))? {
                return Err(ApiError::Conflict("Email already exists".to_string()));
            }
            student.email = email;
        }
        if let Some(v) = text_field(body, "firstName") {
            student.first_name = v;
        }
        if let Some(v) = text_field(body, "lastName") {
            student.last_name = v;
        }
        if let Some(v) = int_field(body, "age") {
            student.age = Some(v as u32);
        }
        if let Some(v) = text_field(body, "grade") {
            student.grade = Some(v);
        }
        if let Some(v) = text_field(body, "course") {
            student.course = Some(v);
        }
        if let Some(v) = text_field(body, "phone") {
            student.phone = Some(v);
        }
        if let Some(v) = text_field(body, "address") {
            student.address = Some(v);
        }
        if let Some(v) = date_field(body, "enrollmentDate") {
            student.enrollment_date = v;
        }
        if let Some(v) = status_field(body) {
            student.status = v;
        }

        student.updated_at = Utc::now();
        self.store.update(&student)?;
        Ok(student)
    }

    /// Permanent removal, no cascading side effects. `NotFound` if absent.
    pub fn delete(&self, id: Uuid) -> ApiResult<()> {
        self.store.delete(id)
    }

    /// Loads the sample roster. Returns the number of records inserted.
    pub fn seed_samples(&self) -> ApiResult<usize> {
        let students = sample_students();
        let count = students.len();
        for student in &students {
            self.store.insert(student)?;
        }
        Ok(count)
    }
}

fn required_text(body: &Value, key: &str) -> ApiResult<String> {
    text_field(body, key)
        .ok_or_else(|| ApiError::Unexpected(format!("validated body missing {}", key)))
}

fn status_field(body: &Value) -> Option<StudentStatus> {
    text_field(body, "status").and_then(|s| StudentStatus::parse(&s))
}
