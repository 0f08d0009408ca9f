//! # Student Store
//!
//! Repository trait over the roster collection plus the in-memory
//! implementation that backs the service and its tests. The trait is the
//! seam for a real database binding.

use std::sync::RwLock;

use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

use super::record::Student;

/// Roster repository trait
pub trait StudentStore: Send + Sync {
    /// All records, unordered
    fn find_all(&self) -> ApiResult<Vec<Student>>;

    /// Find a student by id
    fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Student>>;

    /// Whether an email is taken by a record other than `exclude`
    fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> ApiResult<bool>;

    /// Insert a new record; `Conflict` on duplicate email
    fn insert(&self, student: &Student) -> ApiResult<()>;

    /// Replace an existing record; `NotFound` if absent
    fn update(&self, student: &Student) -> ApiResult<()>;

    /// Remove a record permanently; `NotFound` if absent
    fn delete(&self, id: Uuid) -> ApiResult<()>;
}

/// In-memory roster store (last-write-wins under concurrent updates)
#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    students: RwLock<Vec<Student>>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned() -> ApiError {
    ApiError::Unexpected("Lock poisoned".to_string())
}

impl StudentStore for MemoryStudentStore {
    fn find_all(&self) -> ApiResult<Vec<Student>> {
        let students = self.students.read().map_err(|_| lock_poisoned())?;
        Ok(students.clone())
    }

    fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Student>> {
        let students = self.students.read().map_err(|_| lock_poisoned())?;
        Ok(students.iter().find(|s| s.id == id).cloned())
    }

    fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> ApiResult<bool> {
        let students = self.students.read().map_err(|_| lock_poisoned())?;
        Ok(students
            .iter()
            .any(|s| s.email == email && Some(s.id) != exclude))
    }

    fn insert(&self, student: &Student) -> ApiResult<()> {
        let mut students = self.students.write().map_err(|_| lock_poisoned())?;

        if students.iter().any(|s| s.email == student.email) {
            return Err(ApiError::Conflict("Email already exists".to_string()));
        }

        students.push(student.clone());
        Ok(())
    }

    fn update(&self, student: &Student) -> ApiResult<()> {
        let mut students = self.students.write().map_err(|_| lock_poisoned())?;

        if let Some(existing) = students.iter_mut().find(|s| s.id == student.id) {
            *existing = student.clone();
            Ok(())
        } else {
            Err(ApiError::NotFound("Student".to_string()))
        }
    }

    fn delete(&self, id: Uuid) -> ApiResult<()> {
        let mut students = self.students.write().map_err(|_| lock_poisoned())?;

        let len_before = students.len();
        students.retain(|s| s.id != id);

        if students.len() == len_before {
            Err(ApiError::NotFound("Student".to_string()))
        } else {
            Ok(())
        }
    }
}
