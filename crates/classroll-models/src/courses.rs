//! Course models.
//!
//! Courses are read-only from the student-management surface; they are
//! created by the seeder or directly in the database.

use crate::ids::CourseId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A course students can be enrolled in.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    /// Unique short code, e.g. `MATH-101`.
    pub code: String,
    pub description: Option<String>,
    /// Image reference shown next to the course name.
    pub avatar: String,
}

/// The subset of a course embedded in every [`Student`](crate::students::Student).
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct CourseSummary {
    pub id: CourseId,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub avatar: String,
}

impl From<Course> for CourseSummary {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            name: course.name,
            code: course.code,
            avatar: course.avatar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_course_without_description_deserializes() {
        let course: Course = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "name": "Algebra",
            "code": "MATH-101",
            "description": null,
            "avatar": "/img/algebra.png"
        }))
        .unwrap();
        assert_eq!(course.id, CourseId::from_u128(1));
        assert_eq!(course.description, None);
    }

    #[test]
    fn test_summary_drops_description() {
        let course = Course {
            id: CourseId::from_u128(7),
            name: "Biology".into(),
            code: "BIO-200".into(),
            description: Some("Cells and more".into()),
            avatar: "/img/bio.png".into(),
        };
        let summary = CourseSummary::from(course);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["code"], "BIO-200");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_summary_avatar_defaults_when_absent() {
        let summary: CourseSummary = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000002",
            "name": "Chemistry",
            "code": "CHEM-100"
        }))
        .unwrap();
        assert_eq!(summary.avatar, "");
    }
}
