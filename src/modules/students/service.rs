use crate::modules::courses::service::CourseService;
use anyhow::{Context, anyhow};
use classroll_core::AppError;
use classroll_models::{
    CourseSummary, CreateStudentDto, DUPLICATE_STUDENT_MESSAGE, Student, StudentId,
};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

/// One row of the `student_courses` join, with the course fields inlined.
#[derive(FromRow)]
struct EnrollmentRow {
    student_id: StudentId,
    #[sqlx(flatten)]
    course: CourseSummary,
}

pub struct StudentService;

impl StudentService {
    /// Every student with its courses, oldest registration first.
    #[instrument(skip(db))]
    pub async fn list_students(db: &PgPool) -> Result<Vec<Student>, AppError> {
        let mut students = sqlx::query_as::<_, Student>(
            r#"SELECT id, name, email, cohort, date_joined, last_login, status
               FROM students
               ORDER BY date_joined, name"#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch students")
        .map_err(AppError::database)?;

        let enrollments = sqlx::query_as::<_, EnrollmentRow>(
            r#"SELECT sc.student_id, c.id, c.name, c.code, c.avatar
               FROM student_courses sc
               JOIN courses c ON c.id = sc.course_id
               ORDER BY c.name"#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch student courses")
        .map_err(AppError::database)?;

        let mut by_student: HashMap<StudentId, Vec<CourseSummary>> = HashMap::new();
        for row in enrollments {
            by_student.entry(row.student_id).or_default().push(row.course);
        }
        for student in &mut students {
            student.courses = by_student.remove(&student.id).unwrap_or_default();
        }

        Ok(students)
    }

    /// Registers a student and enrolls it in every requested course.
    ///
    /// Runs in one transaction: an unknown course id or a duplicate email
    /// leaves no partial rows behind.
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let status = dto
            .parsed_status()
            .map_err(|e| AppError::bad_request(anyhow!(e.to_string())))?;
        let course_ids = dto.unique_course_ids();

        let missing = CourseService::missing_course_ids(db, &course_ids).await?;
        if let Some(id) = missing.first() {
            warn!(course_id = %id, "Registration references unknown course");
            return Err(AppError::bad_request(anyhow!("Course {} does not exist", id)));
        }

        let mut tx = db
            .begin()
            .await
            .context("Failed to begin transaction")
            .map_err(AppError::database)?;

        let mut student = sqlx::query_as::<_, Student>(
            r#"INSERT INTO students (name, email, cohort, status)
               VALUES ($1, $2, $3, $4)
               RETURNING id, name, email, cohort, date_joined, last_login, status"#,
        )
        .bind(dto.name.trim())
        .bind(dto.email.trim())
        .bind(dto.cohort.trim())
        .bind(status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow!(DUPLICATE_STUDENT_MESSAGE));
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        sqlx::query(
            r#"INSERT INTO student_courses (student_id, course_id)
               SELECT $1, UNNEST($2::uuid[])"#,
        )
        .bind(student.id)
        .bind(&course_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            // A course deleted between the lookup and the insert.
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::bad_request(anyhow!("One or more courses do not exist"));
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        student.courses = sqlx::query_as::<_, CourseSummary>(
            r#"SELECT id, name, code, avatar
               FROM courses
               WHERE id = ANY($1)
               ORDER BY name"#,
        )
        .bind(&course_ids)
        .fetch_all(&mut *tx)
        .await
        .context("Failed to fetch enrolled courses")
        .map_err(AppError::database)?;

        tx.commit()
            .await
            .context("Failed to commit student registration")
            .map_err(AppError::database)?;

        info!(student_id = %student.id, courses = student.courses.len(), "Student registered");
        Ok(student)
    }
}
