use crate::metrics::{track_student_created, track_student_rejected};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use axum::{Json, extract::State, http::StatusCode};
use classroll_core::{AppError, ErrorResponse};
use classroll_models::{CreateStudentDto, Student};
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "Every student with its courses", body = Vec<Student>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::list_students(&state.db).await?;
    Ok(Json(students))
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student registered", body = Student),
        (status = 400, description = "Missing or invalid field, or unknown course", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    match StudentService::create_student(&state.db, dto).await {
        Ok(student) => {
            track_student_created(student.status.as_str());
            Ok((StatusCode::CREATED, Json(student)))
        }
        Err(err) => {
            if let Some(reason) = rejection_reason(err.status) {
                track_student_rejected(reason);
            }
            Err(err)
        }
    }
}

/// Metrics label for a registration the service turned down. Server errors
/// are not rejections.
fn rejection_reason(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::CONFLICT => Some("duplicate"),
        StatusCode::BAD_REQUEST => Some("invalid"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_reason_follows_status() {
        assert_eq!(rejection_reason(StatusCode::CONFLICT), Some("duplicate"));
        assert_eq!(rejection_reason(StatusCode::BAD_REQUEST), Some("invalid"));
        assert_eq!(rejection_reason(StatusCode::INTERNAL_SERVER_ERROR), None);
    }
}
