use crate::modules::users::service::UserService;
use crate::state::AppState;
use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use classroll_core::{AppError, ErrorResponse};
use classroll_models::{UserId, UserProfile};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserLookupParams {
    /// Id of the profile to load.
    #[serde(rename = "userID")]
    pub user_id: Option<String>,
}

fn parse_user_id(raw: Option<&str>) -> Result<UserId, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::bad_request(anyhow!("User ID is required")))?;

    raw.parse()
        .map_err(|_| AppError::bad_request(anyhow!("Invalid user ID: {}", raw)))
}

#[utoipa::path(
    get,
    path = "/api/users",
    params(UserLookupParams),
    responses(
        (status = 200, description = "The user's profile", body = UserProfile),
        (status = 400, description = "Missing or malformed userID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Query(params): Query<UserLookupParams>,
) -> Result<Json<UserProfile>, AppError> {
    let id = parse_user_id(params.user_id.as_deref())?;
    let user = UserService::get_user(&state.db, id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "The user's profile", body = UserProfile),
        (status = 400, description = "Malformed user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user_by_path(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let id = parse_user_id(Some(&id))?;
    let user = UserService::get_user(&state.db, id).await?;
    Ok(Json(user))
}
