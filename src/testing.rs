//! Database fixtures for integration tests.
//!
//! Compiled for this crate's own tests and for dependents that enable the
//! `test-utils` feature.

use classroll_models::{CourseId, StudentId, UserId};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

pub async fn create_test_course(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    code: &str,
) -> Result<CourseId, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO courses (name, code, description, avatar)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(code)
    .bind(format!("{} for testing", name))
    .bind(format!("/avatars/{}.png", code.to_lowercase()))
    .fetch_one(&mut **tx)
    .await
}

/// Inserts a student directly, bypassing the one-course minimum the API
/// enforces.
pub async fn create_test_student(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    email: &str,
    cohort: &str,
    course_ids: &[CourseId],
) -> Result<StudentId, sqlx::Error> {
    let id: StudentId = sqlx::query_scalar(
        r#"
        INSERT INTO students (name, email, cohort)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(cohort)
    .fetch_one(&mut **tx)
    .await?;

    for course_id in course_ids {
        sqlx::query("INSERT INTO student_courses (student_id, course_id) VALUES ($1, $2)")
            .bind(id)
            .bind(course_id)
            .execute(&mut **tx)
            .await?;
    }

    Ok(id)
}

pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<UserId, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (email, first_name, last_name, theme)
        VALUES ($1, $2, $3, 'dark')
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(first_name)
    .bind(last_name)
    .fetch_one(&mut **tx)
    .await
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn generate_unique_code() -> String {
    format!("C-{}", &Uuid::new_v4().simple().to_string()[..8])
}
