//! In-memory [`RosterApi`] for tests.
//!
//! Behaves like the real service: validates registrations, rejects duplicate
//! emails and resolves course ids. Tests can also inject one-off failures and
//! hold a call open until they release it.

use crate::api::{ApiError, RosterApi};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use classroll_models::{
    Course, CourseId, CourseSummary, DUPLICATE_STUDENT_MESSAGE, NewStudent, Student, StudentId,
    StudentStatus, Theme, UserId, UserProfile,
};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::oneshot;

#[derive(Default)]
struct Inner {
    courses: Vec<Course>,
    students: Vec<Student>,
    users: Vec<UserProfile>,
    failures: VecDeque<ApiError>,
    holds: VecDeque<oneshot::Receiver<()>>,
    calls: usize,
}

#[derive(Default)]
pub struct InMemoryRosterApi {
    inner: Mutex<Inner>,
}

impl InMemoryRosterApi {
    pub fn with_courses(courses: Vec<Course>) -> Self {
        let api = Self::default();
        api.lock().courses = courses;
        api
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_students(&self, students: Vec<Student>) {
        self.lock().students = students;
    }

    pub fn push_student(&self, student: Student) {
        self.lock().students.push(student);
    }

    pub fn push_user(&self, user: UserProfile) {
        self.lock().users.push(user);
    }

    /// The next call (of any operation) fails with `error`.
    pub fn fail_next(&self, error: ApiError) {
        self.lock().failures.push_back(error);
    }

    /// The next call computes its response immediately but does not return
    /// it until the returned sender fires (or is dropped).
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.lock().holds.push_back(rx);
        tx
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls
    }

    async fn respond<T>(
        &self,
        compute: impl FnOnce(&mut Inner) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let (result, hold) = {
            let mut inner = self.lock();
            inner.calls += 1;
            let result = match inner.failures.pop_front() {
                Some(err) => Err(err),
                None => compute(&mut inner),
            };
            (result, inner.holds.pop_front())
        };

        if let Some(hold) = hold {
            let _ = hold.await;
        }
        result
    }
}

#[async_trait]
impl RosterApi for InMemoryRosterApi {
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.respond(|inner| Ok(inner.courses.clone())).await
    }

    async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        self.respond(|inner| Ok(inner.students.clone())).await
    }

    async fn create_student(&self, input: &NewStudent) -> Result<Student, ApiError> {
        self.respond(|inner| {
            if input.name.trim().is_empty()
                || input.email.trim().is_empty()
                || input.cohort.trim().is_empty()
                || input.course_ids.is_empty()
            {
                return Err(ApiError::Validation(
                    "Name, email, cohort, status, and at least one course ID are required".into(),
                ));
            }
            if inner.students.iter().any(|s| s.email == input.email) {
                return Err(ApiError::DuplicateKey(DUPLICATE_STUDENT_MESSAGE.into()));
            }

            let mut courses: Vec<CourseSummary> = Vec::new();
            for id in &input.course_ids {
                let course = inner
                    .courses
                    .iter()
                    .find(|c| c.id == *id)
                    .ok_or_else(|| ApiError::Validation(format!("Course {} does not exist", id)))?;
                if !courses.iter().any(|c| c.id == course.id) {
                    courses.push(course.clone().into());
                }
            }

            let student = Student {
                id: StudentId::new(),
                name: input.name.clone(),
                email: input.email.clone(),
                cohort: input.cohort.clone(),
                date_joined: Utc::now(),
                last_login: None,
                status: input.status,
                courses,
            };
            inner.students.push(student.clone());
            Ok(student)
        })
        .await
    }

    async fn fetch_user(&self, id: UserId) -> Result<UserProfile, ApiError> {
        self.respond(|inner| {
            inner
                .users
                .iter()
                .find(|u| u.id == id)
                .cloned()
                .ok_or_else(|| ApiError::NotFound("User not found".into()))
        })
        .await
    }
}

/// A course with a deterministic id and code.
pub fn course(n: u128, name: &str) -> Course {
    Course {
        id: CourseId::from_u128(n),
        name: name.to_string(),
        code: format!("{}-{}", name.to_uppercase(), n),
        description: None,
        avatar: format!("/avatars/{}.png", name.to_lowercase()),
    }
}

/// A student with a deterministic id; the email is `<name><n>@example.com`.
pub fn student(n: u128, name: &str, cohort: &str, courses: &[&Course]) -> Student {
    Student {
        id: StudentId::from_u128(n),
        name: name.to_string(),
        email: format!("{}{}@example.com", name.to_lowercase(), n),
        cohort: cohort.to_string(),
        date_joined: Utc
            .with_ymd_and_hms(2024, 9, 1, 8, 0, 0)
            .single()
            .unwrap_or_else(Utc::now),
        last_login: None,
        status: StudentStatus::Active,
        courses: courses.iter().map(|c| (*c).clone().into()).collect(),
    }
}

pub fn profile(n: u128, first_name: &str, last_name: &str) -> UserProfile {
    let now = Utc::now();
    UserProfile {
        id: UserId::from_u128(n),
        email: format!("{}@example.com", first_name.to_lowercase()),
        first_name: Some(first_name.to_string()),
        last_name: Some(last_name.to_string()),
        avatar: None,
        theme: Theme::Light,
        created_at: now,
        updated_at: now,
    }
}
