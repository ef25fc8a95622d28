use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned for every non-success response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// A handler failure: the status to answer with and the cause, whose
/// `Display` text becomes the `error` field.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn bad_request<E: Into<Error>>(err: E) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn not_found<E: Into<Error>>(err: E) -> Self {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    /// A unique constraint was violated.
    pub fn conflict<E: Into<Error>>(err: E) -> Self {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn database<E: Into<Error>>(err: E) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.error.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}

/// Anything unexpected is a `500`.
impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }
}
