//! Sample roster loaded by `campusd serve --seed`.

use chrono::Utc;
use uuid::Uuid;

use super::record::{Student, StudentStatus};

#[allow(clippy::too_many_arguments)]
fn student(
    first: &str,
    last: &str,
    email: &str,
    age: u32,
    grade: &str,
    course: &str,
    phone: &str,
    address: &str,
    status: StudentStatus,
) -> Student {
    let now = Utc::now();
    Student {
        id: Uuid::new_v4(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        age: Some(age),
        grade: Some(grade.to_string()),
        course: Some(course.to_string()),
        phone: Some(phone.to_string()),
        address: Some(address.to_string()),
        enrollment_date: now,
        status,
        created_at: now,
        updated_at: now,
    }
}

/// The eight sample students
pub fn sample_students() -> Vec<Student> {
    use StudentStatus::{Active, Graduated, Inactive};

    vec![
        student(
            "Alice",
            "Johnson",
            "alice.johnson@example.com",
            20,
            "A",
            "Computer Science",
            "555-0101",
            "123 Main St, City, State 12345",
            Active,
        ),
        student(
            "Bob",
            "Smith",
            "bob.smith@example.com",
            22,
            "B+",
            "Mathematics",
            "555-0102",
            "456 Oak Ave, City, State 12345",
            Active,
        ),
        student(
            "Carol",
            "Williams",
            "carol.williams@example.com",
            21,
            "A-",
            "Physics",
            "555-0103",
            "789 Pine Rd, City, State 12345",
            Inactive,
        ),
        student(
            "David",
            "Brown",
            "david.brown@example.com",
            23,
            "B",
            "Chemistry",
            "555-0104",
            "321 Elm St, City, State 12345",
            Active,
        ),
        student(
            "Emma",
            "Davis",
            "emma.davis@example.com",
            24,
            "A+",
            "Computer Science",
            "555-0105",
            "654 Maple Dr, City, State 12345",
            Graduated,
        ),
        student(
            "Frank",
            "Miller",
            "frank.miller@example.com",
            19,
            "C+",
            "Biology",
            "555-0106",
            "987 Cedar Ln, City, State 12345",
            Active,
        ),
        student(
            "Grace",
            "Wilson",
            "grace.wilson@example.com",
            20,
            "A-",
            "Engineering",
            "555-0107",
            "147 Birch Ct, City, State 12345",
            Active,
        ),
        student(
            "Henry",
            "Moore",
            "henry.moore@example.com",
            22,
            "B",
            "Economics",
            "555-0108",
            "258 Spruce Way, City, State 12345",
            Inactive,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_roster_shape() {
        let students = sample_students();
        assert_eq!(students.len(), 8);

        // Emails are unique, satisfying the store invariant
        let mut emails: Vec<&str> = students.iter().map(|s| s.email.as_str()).collect();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), 8);
    }
}
