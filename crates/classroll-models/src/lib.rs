//! # Classroll Models
//!
//! Domain models and DTOs shared by the Classroll API server, the dashboard
//! stores and the seeder.
//!
//! # Modules
//!
//! - [`courses`]: Courses and the course summary embedded in students
//! - [`ids`]: Strongly-typed entity ids
//! - [`students`]: Students, statuses and the registration DTOs
//! - [`users`]: Dashboard user profiles
//!
//! # Example
//!
//! ```ignore
//! use classroll_models::{NewStudent, StudentStatus, CourseId};
//!
//! let input = NewStudent {
//!     name: "Alice".into(),
//!     email: "alice@example.com".into(),
//!     cohort: "2024".into(),
//!     status: StudentStatus::Active,
//!     course_ids: vec![CourseId::new()],
//! };
//! ```

pub mod courses;
pub mod ids;
pub mod students;
pub mod users;

pub use courses::{Course, CourseSummary};
pub use ids::{CourseId, StudentId, UserId};
pub use students::{
    CreateStudentDto, DUPLICATE_STUDENT_MESSAGE, InvalidStatus, NewStudent, Student,
    StudentStatus,
};
pub use users::{Theme, UserProfile};
