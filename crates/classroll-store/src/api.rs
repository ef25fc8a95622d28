//! The data-fetching seam between the stores and the Remote Data API.

use async_trait::async_trait;
use classroll_models::{Course, NewStudent, Student, UserId, UserProfile};
use std::sync::Arc;
use thiserror::Error;

/// Failures a [`RosterApi`] call can end in.
///
/// The `Display` text is the human-readable message the stores expose as
/// their `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never completed, the server failed, or the body could not
    /// be decoded.
    #[error("{0}")]
    Transport(String),
    /// A required field was missing or invalid.
    #[error("{0}")]
    Validation(String),
    /// A unique column (the student email) already holds this value.
    #[error("{0}")]
    DuplicateKey(String),
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            ApiError::Transport(msg)
            | ApiError::Validation(msg)
            | ApiError::DuplicateKey(msg)
            | ApiError::NotFound(msg) => msg,
        }
    }
}

/// Operations the dashboard needs from the Remote Data API.
///
/// [`HttpRosterApi`](crate::http::HttpRosterApi) talks to the real service;
/// tests inject an in-memory implementation.
#[async_trait]
pub trait RosterApi: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError>;

    /// Every student, each with its course summaries.
    async fn list_students(&self) -> Result<Vec<Student>, ApiError>;

    /// Registers a student and returns it with server-assigned fields and
    /// resolved courses.
    async fn create_student(&self, input: &NewStudent) -> Result<Student, ApiError>;

    async fn fetch_user(&self, id: UserId) -> Result<UserProfile, ApiError>;
}

#[async_trait]
impl<T> RosterApi for Arc<T>
where
    T: RosterApi + ?Sized,
{
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        (**self).list_courses().await
    }

    async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        (**self).list_students().await
    }

    async fn create_student(&self, input: &NewStudent) -> Result<Student, ApiError> {
        (**self).create_student(input).await
    }

    async fn fetch_user(&self, id: UserId) -> Result<UserProfile, ApiError> {
        (**self).fetch_user(id).await
    }
}
