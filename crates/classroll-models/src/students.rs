//! Student domain models and DTOs.
//!
//! Wire format is camelCase JSON (`dateJoined`, `lastLogin`, `courseIds`)
//! and statuses travel in upper case (`"ACTIVE"`).

use crate::courses::CourseSummary;
use crate::ids::{CourseId, StudentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Message returned when a student email (or any other unique column) collides.
pub const DUPLICATE_STUDENT_MESSAGE: &str = "Email or other unique field already exists";

/// Enrollment status of a student.
#[derive(
    Serialize, Deserialize, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "student_status", rename_all = "UPPERCASE")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
    Graduated,
}

impl StudentStatus {
    pub const ALL: [StudentStatus; 4] = [
        StudentStatus::Active,
        StudentStatus::Inactive,
        StudentStatus::Suspended,
        StudentStatus::Graduated,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            StudentStatus::Active => "ACTIVE",
            StudentStatus::Inactive => "INACTIVE",
            StudentStatus::Suspended => "SUSPENDED",
            StudentStatus::Graduated => "GRADUATED",
        }
    }

    /// "Invalid status. Valid statuses are: ACTIVE, INACTIVE, SUSPENDED, GRADUATED"
    pub fn invalid_message() -> String {
        let valid: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
        format!("Invalid status. Valid statuses are: {}", valid.join(", "))
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatus(pub String);

impl fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (got {:?})", StudentStatus::invalid_message(), self.0)
    }
}

impl std::error::Error for InvalidStatus {}

impl FromStr for StudentStatus {
    type Err = InvalidStatus;

    /// Parsing is exact: the API only accepts the upper-case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidStatus(s.to_string()))
    }
}

/// A registered student together with the courses they attend.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    /// Enrollment batch label, e.g. `"2024"`.
    pub cohort: String,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub status: StudentStatus,
    #[sqlx(skip)]
    #[serde(default)]
    pub courses: Vec<CourseSummary>,
}

impl Student {
    /// Case-insensitive prefix match on the student's name.
    ///
    /// An empty prefix matches every student.
    pub fn name_starts_with(&self, prefix: &str) -> bool {
        self.name.to_lowercase().starts_with(&prefix.to_lowercase())
    }

    /// Whether the student attends a course with exactly this name.
    pub fn has_course_named(&self, course_name: &str) -> bool {
        self.courses.iter().any(|course| course.name == course_name)
    }
}

/// Input for registering a student from a client.
///
/// The server assigns the id and join timestamp; `last_login` starts empty.
/// `course_ids` must contain at least one course.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub cohort: String,
    pub status: StudentStatus,
    pub course_ids: Vec<CourseId>,
}

/// Request body accepted by `POST /api/students`.
///
/// `status` stays a string so an unknown value can be answered with the list
/// of valid statuses instead of a generic deserialization error.
#[derive(Deserialize, Serialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
    #[validate(custom(function = "not_blank", message = "name is required"))]
    pub name: String,
    #[validate(
        custom(function = "not_blank", message = "email is required"),
        email(message = "email must be a valid address")
    )]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "cohort is required"))]
    pub cohort: String,
    #[validate(custom(function = "valid_status"))]
    #[schema(example = "ACTIVE")]
    pub status: String,
    #[validate(length(min = 1, message = "at least one course ID is required"))]
    pub course_ids: Vec<CourseId>,
}

impl CreateStudentDto {
    /// The parsed status. Only meaningful after [`Validate::validate`] passed.
    pub fn parsed_status(&self) -> Result<StudentStatus, InvalidStatus> {
        self.status.parse()
    }

    /// Course ids with duplicates removed, keeping first-seen order.
    pub fn unique_course_ids(&self) -> Vec<CourseId> {
        let mut seen = Vec::with_capacity(self.course_ids.len());
        for id in &self.course_ids {
            if !seen.contains(id) {
                seen.push(*id);
            }
        }
        seen
    }
}

impl From<NewStudent> for CreateStudentDto {
    fn from(student: NewStudent) -> Self {
        Self {
            name: student.name,
            email: student.email,
            cohort: student.cohort,
            status: student.status.as_str().to_string(),
            course_ids: student.course_ids,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn valid_status(value: &str) -> Result<(), ValidationError> {
    value.parse::<StudentStatus>().map(|_| ()).map_err(|_| {
        ValidationError::new("invalid_status")
            .with_message(Cow::Owned(StudentStatus::invalid_message()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dto() -> CreateStudentDto {
        CreateStudentDto {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            cohort: "2024".into(),
            status: "ACTIVE".into(),
            course_ids: vec![CourseId::from_u128(1)],
        }
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in StudentStatus::ALL {
            assert_eq!(status.as_str().parse::<StudentStatus>().unwrap(), status);
        }
        assert!("active".parse::<StudentStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_upper_case() {
        assert_eq!(
            serde_json::to_value(StudentStatus::Graduated).unwrap(),
            json!("GRADUATED")
        );
    }

    #[test]
    fn test_invalid_status_message_lists_all_values() {
        assert_eq!(
            StudentStatus::invalid_message(),
            "Invalid status. Valid statuses are: ACTIVE, INACTIVE, SUSPENDED, GRADUATED"
        );
    }

    #[test]
    fn test_student_deserializes_camel_case() {
        let student: Student = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-00000000000a",
            "name": "Alice",
            "email": "alice@example.com",
            "cohort": "2024",
            "dateJoined": "2024-09-01T08:00:00Z",
            "lastLogin": null,
            "status": "ACTIVE",
            "courses": [{
                "id": "00000000-0000-0000-0000-000000000001",
                "name": "Algebra",
                "code": "MATH-101",
                "avatar": "/img/algebra.png"
            }]
        }))
        .unwrap();

        assert_eq!(student.id, StudentId::from_u128(10));
        assert_eq!(student.last_login, None);
        assert!(student.has_course_named("Algebra"));
        assert!(!student.has_course_named("algebra"));
    }

    #[test]
    fn test_name_prefix_is_case_insensitive() {
        let student: Student = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-00000000000b",
            "name": "Alice",
            "email": "a@example.com",
            "cohort": "2024",
            "dateJoined": "2024-09-01T08:00:00Z",
            "status": "INACTIVE"
        }))
        .unwrap();

        assert!(student.name_starts_with("AL"));
        assert!(student.name_starts_with(""));
        assert!(!student.name_starts_with("lice"));
        assert!(student.courses.is_empty());
    }

    #[test]
    fn test_new_student_wire_shape() {
        let new_student = NewStudent {
            name: "Bob".into(),
            email: "bob@example.com".into(),
            cohort: "2023".into(),
            status: StudentStatus::Suspended,
            course_ids: vec![CourseId::from_u128(2)],
        };
        let value = serde_json::to_value(&new_student).unwrap();
        assert_eq!(value["status"], "SUSPENDED");
        assert_eq!(
            value["courseIds"],
            json!(["00000000-0000-0000-0000-000000000002"])
        );
    }

    #[test]
    fn test_valid_dto_passes() {
        assert!(dto().validate().is_ok());
        assert_eq!(dto().parsed_status().unwrap(), StudentStatus::Active);
    }

    #[test]
    fn test_empty_course_ids_rejected() {
        let mut dto = dto();
        dto.course_ids.clear();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("course_ids"));
    }

    #[test]
    fn test_blank_fields_rejected() {
        let mut dto = dto();
        dto.name = "   ".into();
        dto.cohort = String::new();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("cohort"));
    }

    #[test]
    fn test_unknown_status_rejected_with_listing() {
        let mut dto = dto();
        dto.status = "EXPELLED".into();
        let errors = dto.validate().unwrap_err();
        let status_errors = &errors.field_errors()["status"];
        assert_eq!(
            status_errors[0].message.as_deref(),
            Some(StudentStatus::invalid_message().as_str())
        );
    }

    #[test]
    fn test_unique_course_ids_keeps_order() {
        let mut dto = dto();
        dto.course_ids = vec![
            CourseId::from_u128(3),
            CourseId::from_u128(1),
            CourseId::from_u128(3),
        ];
        assert_eq!(
            dto.unique_course_ids(),
            vec![CourseId::from_u128(3), CourseId::from_u128(1)]
        );
    }
}
