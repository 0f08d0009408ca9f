//! # Profile Pipelines
//!
//! Personal and academic patch pipelines over the authenticated identity's
//! own record. Same whitelisted patch semantics as the roster: strings
//! skip empty, numbers and dates apply when present, an empty list is a
//! deliberate clear. The credential, picture pointer, and registrar id are
//! never settable through a request body.

use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::validate::{
    date_field, float_field, string_list_field, text_field, FieldRule, RuleSet,
};

use super::user::{GradeEntry, User, UserStore};

static PERSONAL_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        "personal",
        vec![
            FieldRule::text("name"),
            FieldRule::text("phone"),
            FieldRule::date("dateOfBirth"),
            FieldRule::text("address"),
        ],
    )
});

static ACADEMIC_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        "academic",
        vec![
            FieldRule::text("program"),
            FieldRule::text("year"),
            FieldRule::text("semester"),
            FieldRule::float("gpa").with_bounds(0.0, 4.0),
            FieldRule::text_list("enrolledCourses"),
            FieldRule::entry_list(
                "grades",
                vec![
                    FieldRule::text("course"),
                    FieldRule::text("grade"),
                    FieldRule::float("credits"),
                    FieldRule::text("semester"),
                ],
            ),
        ],
    )
});

/// Rule set for `PUT /personal`
pub fn personal_rules() -> &'static RuleSet {
    &PERSONAL_RULES
}

/// Rule set for `PUT /academic`
pub fn academic_rules() -> &'static RuleSet {
    &ACADEMIC_RULES
}

/// Profile service over the shared user store
pub struct ProfileService<U: UserStore> {
    users: Arc<U>,
}

impl<U: UserStore> ProfileService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    fn resolve(&self, user_id: Uuid) -> ApiResult<User> {
        self.users
            .find_by_id(user_id)?
            .ok_or_else(|| ApiError::NotFound("User".to_string()))
    }

    /// The authenticated identity's full profile
    pub fn profile(&self, user_id: Uuid) -> ApiResult<User> {
        self.resolve(user_id)
    }

    /// Patch personal details: name, phone, dateOfBirth, address
    pub fn update_personal(&self, user_id: Uuid, body: &Value) -> ApiResult<User> {
        personal_rules().validate_patch(body)?;

        let mut user = self.resolve(user_id)?;

        if let Some(v) = text_field(body, "name") {
            user.name = v;
        }
        if let Some(v) = text_field(body, "phone") {
            user.phone = Some(v);
        }
        if let Some(v) = date_field(body, "dateOfBirth") {
            user.date_of_birth = Some(v);
        }
        if let Some(v) = text_field(body, "address") {
            user.address = Some(v);
        }

        user.updated_at = Utc::now();
        self.users.update(&user)?;
        Ok(user)
    }

    /// Patch academic details: program, year, semester, gpa,
    /// enrolledCourses, grades. GPA applies on presence, so 0.0 is
    /// settable; list fields replace wholesale, and an empty list clears.
    pub fn update_academic(&self, user_id: Uuid, body: &Value) -> ApiResult<User> {
        academic_rules().validate_patch(body)?;

        let mut user = self.resolve(user_id)?;

        if let Some(v) = text_field(body, "program") {
            user.program = Some(v);
        }
        if let Some(v) = text_field(body, "year") {
            user.year = Some(v);
        }
        if let Some(v) = text_field(body, "semester") {
            user.semester = Some(v);
        }
        // gpa applies on presence, so 0.0 is settable
        if let Some(v) = float_field(body, "gpa") {
            user.gpa = Some(v);
        }
        if let Some(v) = string_list_field(body, "enrolledCourses") {
            user.enrolled_courses = v;
        }
        if let Some(v) = grades_field(body) {
            user.grades = v;
        }

        user.updated_at = Utc::now();
        self.users.update(&user)?;
        Ok(user)
    }

    /// Point the profile at a newly stored picture. Last write wins when
    /// concurrent uploads race.
    pub fn attach_picture(&self, user_id: Uuid, web_path: &str) -> ApiResult<User> {
        let mut user = self.resolve(user_id)?;
        user.profile_picture = web_path.to_string();
        user.updated_at = Utc::now();
        self.users.update(&user)?;
        Ok(user)
    }
}

fn grades_field(body: &Value) -> Option<Vec<GradeEntry>> {
    let value = body.get("grades")?;
    value.as_array()?;
    // Shape already validated; unknown entry keys are dropped here
    serde_json::from_value(value.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::super::user::MemoryUserStore;
    use super::*;
    use crate::auth::crypto::PasswordPolicy;
    use serde_json::json;

    fn setup() -> (ProfileService<MemoryUserStore>, Uuid) {
        let store = Arc::new(MemoryUserStore::new());
        let user = User::new(
            "Jane Doe".to_string(),
            "jane@example.com".to_string(),
            "password123",
            &PasswordPolicy::default(),
        )
        .unwrap();
        let id = user.id;
        store.create(&user).unwrap();
        (ProfileService::new(store), id)
    }

    #[test]
    fn test_personal_patch_merges_present_fields_only() {
        let (service, id) = setup();

        let user = service
            .update_personal(
                id,
                &json!({ "phone": "555-0199", "name": "", "address": null }),
            )
            .unwrap();

        assert_eq!(user.phone.as_deref(), Some("555-0199"));
        assert_eq!(user.name, "Jane Doe");
        assert_eq!(user.address, None);
    }

    #[test]
    fn test_personal_patch_date_of_birth() {
        let (service, id) = setup();
        let user = service
            .update_personal(id, &json!({ "dateOfBirth": "2000-01-15" }))
            .unwrap();
        assert_eq!(
            user.date_of_birth.unwrap().to_rfc3339(),
            "2000-01-15T00:00:00+00:00"
        );
    }

    #[test]
    fn test_academic_patch_gpa_bounds() {
        let (service, id) = setup();

        let result = service.update_academic(id, &json!({ "gpa": 5.0 }));
        assert!(matches!(result, Err(ApiError::ValidationFailed(_))));
        assert_eq!(service.profile(id).unwrap().gpa, None);

        // 0.0 is a legal GPA and applies on presence
        let user = service.update_academic(id, &json!({ "gpa": 0.0 })).unwrap();
        assert_eq!(user.gpa, Some(0.0));
    }

    #[test]
    fn test_academic_patch_rejection_leaves_other_fields_unapplied() {
        let (service, id) = setup();

        let result = service
            .update_academic(id, &json!({ "program": "Physics", "gpa": 4.5 }));
        assert!(result.is_err());

        let stored = service.profile(id).unwrap();
        assert_eq!(stored.program, None);
    }

    #[test]
    fn test_empty_course_list_is_a_clear() {
        let (service, id) = setup();

        service
            .update_academic(id, &json!({ "enrolledCourses": ["CS101", "CS102"] }))
            .unwrap();
        let user = service
            .update_academic(id, &json!({ "enrolledCourses": [] }))
            .unwrap();
        assert!(user.enrolled_courses.is_empty());
    }

    #[test]
    fn test_grades_replace_wholesale() {
        let (service, id) = setup();

        let user = service
            .update_academic(
                id,
                &json!({
                    "grades": [
                        { "course": "CS101", "grade": "A", "credits": 4, "semester": "Fall" }
                    ]
                }),
            )
            .unwrap();

        assert_eq!(user.grades.len(), 1);
        assert_eq!(user.grades[0].course.as_deref(), Some("CS101"));
        assert_eq!(user.grades[0].credits, Some(4.0));
    }

    #[test]
    fn test_invalid_grade_entry_is_rejected_with_indexed_path() {
        let (service, id) = setup();

        let result = service.update_academic(
            id,
            &json!({ "grades": [ { "course": "CS101" }, { "credits": "four" } ] }),
        );
        match result.unwrap_err() {
            ApiError::ValidationFailed(v) => assert_eq!(v[0].field, "grades[1].credits"),
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_credential_not_settable_via_patch() {
        let (service, id) = setup();
        let before = service.profile(id).unwrap().password_hash;

        let user = service
            .update_personal(
                id,
                &json!({ "name": "J", "password": "hacked", "passwordHash": "hacked" }),
            )
            .unwrap();

        assert_eq!(user.password_hash, before);
        assert_eq!(user.student_id, None);
    }

    #[test]
    fn test_attach_picture_updates_pointer() {
        let (service, id) = setup();

        let user = service
            .attach_picture(id, "/uploads/abc-123.png")
            .unwrap();
        assert_eq!(user.profile_picture, "/uploads/abc-123.png");

        // Last write wins
        let user = service
            .attach_picture(id, "/uploads/abc-456.png")
            .unwrap();
        assert_eq!(user.profile_picture, "/uploads/abc-456.png");
    }

    #[test]
    fn test_unknown_user_is_not_found() {
        let (service, _) = setup();
        let result = service.profile(Uuid::new_v4());
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
