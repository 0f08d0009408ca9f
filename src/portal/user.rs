//! # Portal User
//!
//! User model and repository. The password hash is never serialized to
//! callers; hashing happens exactly once, at identity creation.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::crypto::{hash_password, verify_password, PasswordPolicy};
use crate::auth::errors::AuthResult;
use crate::error::{ApiError, ApiResult};

/// One grade-book entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
}

/// Portal identity + profile document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier, store-assigned
    pub id: Uuid,

    pub name: String,

    /// Lowercased, unique across all users
    pub email: String,

    /// Argon2id password hash (never plaintext, never serialized)
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Web path of the stored picture, empty until one is uploaded
    #[serde(default)]
    pub profile_picture: String,

    /// Registrar-assigned, never caller-settable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,

    /// Bounded to [0, 4]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,

    #[serde(default)]
    pub enrolled_courses: Vec<String>,

    #[serde(default)]
    pub grades: Vec<GradeEntry>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the given name, email, and password.
    /// Validates the password against the policy and hashes it.
    pub fn new(
        name: String,
        email: String,
        password: &str,
        policy: &PasswordPolicy,
    ) -> AuthResult<Self> {
        policy.validate(password)?;
        let password_hash = hash_password(password)?;

        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            phone: None,
            date_of_birth: None,
            address: None,
            profile_picture: String::new(),
            student_id: None,
            program: None,
            year: None,
            semester: None,
            gpa: None,
            enrolled_courses: Vec::new(),
            grades: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Verify a password against this user's stored hash
    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        verify_password(password, &self.password_hash)
    }
}

/// User repository trait
pub trait UserStore: Send + Sync {
    /// Find a user by their ID
    fn find_by_id(&self, id: Uuid) -> ApiResult<Option<User>>;

    /// Find a user by their email
    fn find_by_email(&self, email: &str) -> ApiResult<Option<User>>;

    /// Check if an email is already registered
    fn email_exists(&self, email: &str) -> ApiResult<bool>;

    /// Create a new user; `Conflict` on duplicate email
    fn create(&self, user: &User) -> ApiResult<()>;

    /// Update an existing user; `NotFound` if absent
    fn update(&self, user: &User) -> ApiResult<()>;
}

/// In-memory user store (last-write-wins under concurrent updates)
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned() -> ApiError {
    ApiError::Unexpected("Lock poisoned".to_string())
}

impl UserStore for MemoryUserStore {
    fn find_by_id(&self, id: Uuid) -> ApiResult<Option<User>> {
        let users = self.users.read().map_err(|_| lock_poisoned())?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let users = self.users.read().map_err(|_| lock_poisoned())?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    fn email_exists(&self, email: &str) -> ApiResult<bool> {
        let users = self.users.read().map_err(|_| lock_poisoned())?;
        Ok(users.iter().any(|u| u.email == email))
    }

    fn create(&self, user: &User) -> ApiResult<()> {
        let mut users = self.users.write().map_err(|_| lock_poisoned())?;

        if users.iter().any(|u| u.email == user.email) {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        users.push(user.clone());
        Ok(())
    }

    fn update(&self, user: &User) -> ApiResult<()> {
        let mut users = self.users.write().map_err(|_| lock_poisoned())?;

        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            *existing = user.clone();
            Ok(())
        } else {
            Err(ApiError::NotFound("User".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::errors::AuthError;

    fn default_policy() -> PasswordPolicy {
        PasswordPolicy::default()
    }

    fn test_user(email: &str) -> User {
        User::new(
            "Test User".to_string(),
            email.to_string(),
            "password123",
            &default_policy(),
        )
        .unwrap()
    }

    #[test]
    fn test_user_creation() {
        let user = test_user("test@example.com");

        assert_eq!(user.email, "test@example.com");
        assert!(!user.password_hash.is_empty());
        assert_ne!(user.password_hash, "password123");
        assert_eq!(user.profile_picture, "");
        assert!(user.enrolled_courses.is_empty());
    }

    #[test]
    fn test_password_verification() {
        let user = test_user("test@example.com");

        assert!(user.verify_password("password123").unwrap());
        assert!(!user.verify_password("wrong_password").unwrap());
    }

    #[test]
    fn test_weak_password_rejected() {
        let result = User::new(
            "Test".to_string(),
            "test@example.com".to_string(),
            "short",
            &default_policy(),
        );
        assert!(matches!(result, Err(AuthError::WeakPassword(_))));
    }

    #[test]
    fn test_in_memory_store() {
        let store = MemoryUserStore::new();
        let user = test_user("test@example.com");
        let user_id = user.id;

        store.create(&user).unwrap();

        let found = store.find_by_id(user_id).unwrap();
        assert_eq!(found.unwrap().email, "test@example.com");

        assert!(store.find_by_email("test@example.com").unwrap().is_some());
        assert!(store.email_exists("test@example.com").unwrap());
        assert!(!store.email_exists("other@example.com").unwrap());

        let dup = test_user("test@example.com");
        assert!(matches!(store.create(&dup), Err(ApiError::Conflict(_))));
    }

    #[test]
    fn test_serialization_omits_password_hash() {
        let user = test_user("test@example.com");

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("passwordHash"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains(&user.password_hash));
    }

    #[test]
    fn test_grade_entry_wire_format() {
        let entry = GradeEntry {
            course: Some("CS101".into()),
            grade: Some("A".into()),
            credits: Some(4.0),
            semester: Some("Fall 2024".into()),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["course"], "CS101");
        assert_eq!(json["credits"], 4.0);
    }
}
