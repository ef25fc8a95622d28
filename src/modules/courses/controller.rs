use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use axum::{Json, extract::State};
use classroll_core::{AppError, ErrorResponse};
use classroll_models::Course;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Every course on offer", body = Vec<Course>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::list_courses(&state.db).await?;
    Ok(Json(courses))
}
