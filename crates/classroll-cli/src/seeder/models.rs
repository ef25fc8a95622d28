//! Seed records and the configuration controlling how many are generated.

use chrono::{DateTime, Utc};
use classroll_models::{StudentStatus, Theme};

/// Email domain shared by every seeded student and user.
pub const SEED_EMAIL_DOMAIN: &str = "seed.classroll.dev";

/// Prefix of every seeded course code.
pub const SEED_CODE_PREFIX: &str = "SEED-";

pub struct CourseSeed {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub avatar: String,
}

pub struct StudentSeed {
    pub name: String,
    pub email: String,
    pub cohort: String,
    pub status: StudentStatus,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    /// Indexes into the seeded course list.
    pub course_indexes: Vec<usize>,
}

pub struct UserSeed {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub theme: Theme,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedConfig {
    pub courses: usize,
    pub students: usize,
    pub users: usize,
    /// Upper bound on enrollments per student; every student gets at least one.
    pub max_courses_per_student: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            courses: 8,
            students: 100,
            users: 3,
            max_courses_per_student: 3,
        }
    }
}

impl SeedConfig {
    pub fn new(courses: usize) -> Self {
        Self {
            courses,
            ..Default::default()
        }
    }

    pub fn with_students(mut self, students: usize) -> Self {
        self.students = students;
        self
    }

    pub fn with_users(mut self, users: usize) -> Self {
        self.users = users;
        self
    }

    pub fn with_max_courses_per_student(mut self, max: usize) -> Self {
        self.max_courses_per_student = max.max(1);
        self
    }

    /// Largest possible number of `student_courses` rows.
    pub fn max_enrollments(&self) -> usize {
        self.students * self.max_courses_per_student.min(self.courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = SeedConfig::new(4)
            .with_students(10)
            .with_users(1)
            .with_max_courses_per_student(0);

        assert_eq!(config.courses, 4);
        assert_eq!(config.students, 10);
        assert_eq!(config.users, 1);
        assert_eq!(config.max_courses_per_student, 1);
    }

    #[test]
    fn test_max_enrollments_capped_by_courses() {
        let config = SeedConfig::new(2).with_students(10).with_max_courses_per_student(5);
        assert_eq!(config.max_enrollments(), 20);
    }
}
