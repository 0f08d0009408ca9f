//! # Query/Filter Pipeline
//!
//! Builds a predicate from optional `search` / `status` / `sort`
//! parameters and orders the result. An empty result set is valid, not an
//! error; an unknown sort field fails closed.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

use super::record::Student;

/// Optional roster query parameters, straight off the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentQuery {
    /// Case-insensitive substring, OR-combined across name/email/course
    pub search: Option<String>,

    /// Exact status match; an unknown status matches nothing
    pub status: Option<String>,

    /// Sort field, optional leading `-` for descending
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum SortField {
    FirstName,
    LastName,
    Email,
    Age,
    Grade,
    Course,
    Status,
    EnrollmentDate,
    CreatedAt,
    UpdatedAt,
}

fn parse_sort(spec: &str) -> ApiResult<(SortField, bool)> {
    let (descending, name) = match spec.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, spec),
    };

    let field = match name {
        "firstName" => SortField::FirstName,
        "lastName" => SortField::LastName,
        "email" => SortField::Email,
        "age" => SortField::Age,
        "grade" => SortField::Grade,
        "course" => SortField::Course,
        "status" => SortField::Status,
        "enrollmentDate" => SortField::EnrollmentDate,
        "createdAt" => SortField::CreatedAt,
        "updatedAt" => SortField::UpdatedAt,
        other => {
            return Err(ApiError::violation(
                "sort",
                format!("unknown sort field: {}", other),
            ))
        }
    };

    Ok((field, descending))
}

// Missing optional values sort before present ones ascending
// (Option's natural ordering).
fn compare(a: &Student, b: &Student, field: SortField) -> Ordering {
    match field {
        SortField::FirstName => a.first_name.cmp(&b.first_name),
        SortField::LastName => a.last_name.cmp(&b.last_name),
        SortField::Email => a.email.cmp(&b.email),
        SortField::Age => a.age.cmp(&b.age),
        SortField::Grade => a.grade.cmp(&b.grade),
        SortField::Course => a.course.cmp(&b.course),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        SortField::EnrollmentDate => a.enrollment_date.cmp(&b.enrollment_date),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

fn matches_search(student: &Student, needle: &str) -> bool {
    student.first_name.to_lowercase().contains(needle)
        || student.last_name.to_lowercase().contains(needle)
        || student.email.to_lowercase().contains(needle)
        || student
            .course
            .as_deref()
            .map(|c| c.to_lowercase().contains(needle))
            .unwrap_or(false)
}

fn param(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Applies search/status filters and ordering to a roster snapshot.
/// Default order is most-recently-created first. Sorting is stable.
pub fn filter_and_sort(
    mut students: Vec<Student>,
    query: &StudentQuery,
) -> ApiResult<Vec<Student>> {
    if let Some(search) = param(&query.search) {
        let needle = search.to_lowercase();
        students.retain(|s| matches_search(s, &needle));
    }

    if let Some(status) = param(&query.status) {
        students.retain(|s| s.status.as_str() == status);
    }

    match param(&query.sort) {
        Some(spec) => {
            let (field, descending) = parse_sort(spec)?;
            students.sort_by(|a, b| {
                let ord = compare(a, b, field);
                if descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }
        None => students.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }

    Ok(students)
}
