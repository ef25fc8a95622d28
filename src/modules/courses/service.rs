use anyhow::Context;
use classroll_core::AppError;
use classroll_models::{Course, CourseId};
use sqlx::PgPool;
use tracing::instrument;

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db))]
    pub async fn list_courses(db: &PgPool) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(
            r#"SELECT id, name, code, description, avatar
               FROM courses
               ORDER BY name, code"#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch courses")
        .map_err(AppError::database)?;

        Ok(courses)
    }

    /// Returns the ids from `ids` that have no course row.
    #[instrument(skip(db))]
    pub async fn missing_course_ids(
        db: &PgPool,
        ids: &[CourseId],
    ) -> Result<Vec<CourseId>, AppError> {
        let existing: Vec<CourseId> =
            sqlx::query_scalar(r#"SELECT id FROM courses WHERE id = ANY($1)"#)
                .bind(ids)
                .fetch_all(db)
                .await
                .context("Failed to look up courses")
                .map_err(AppError::database)?;

        Ok(ids
            .iter()
            .filter(|id| !existing.contains(id))
            .copied()
            .collect())
    }
}
