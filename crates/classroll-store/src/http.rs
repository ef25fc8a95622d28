//! [`RosterApi`] over HTTP with `reqwest`.

use crate::api::{ApiError, RosterApi};
use async_trait::async_trait;
use classroll_config::ApiClientConfig;
use classroll_models::{Course, DUPLICATE_STUDENT_MESSAGE, NewStudent, Student, UserId, UserProfile};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

const FETCH_COURSES_FAILED: &str = "Failed to fetch courses";
const FETCH_STUDENTS_FAILED: &str = "Failed to fetch students";
const ADD_STUDENT_FAILED: &str = "Failed to add student";
const FETCH_USER_FAILED: &str = "Failed to fetch user";

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the Classroll Remote Data API.
#[derive(Clone, Debug)]
pub struct HttpRosterApi {
    client: Client,
    config: ApiClientConfig,
}

impl HttpRosterApi {
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Uses an existing client, e.g. one shared with other services.
    pub fn with_client(client: Client, config: ApiClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    async fn send<T>(
        &self,
        request: reqwest::RequestBuilder,
        failure: &'static str,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("{}: {}", failure, e)))?;

        decode(response, failure).await
    }
}

/// Maps a response onto the client error taxonomy.
///
/// `400`/`422` become validation failures carrying the server's reason,
/// `409` a duplicate key, `404` not found; anything else non-successful is
/// reported with the operation's generic `failure` message.
async fn decode<T>(response: Response, failure: &'static str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Transport(format!("{}: invalid response body ({})", failure, e)));
    }

    let body = response.text().await.unwrap_or_default();
    let reason = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .ok()
        .or_else(|| Some(body.trim().to_string()).filter(|text| !text.is_empty()));

    debug!(status = status.as_u16(), reason = ?reason, "API request failed");

    Err(match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::Validation(reason.unwrap_or_else(|| failure.to_string()))
        }
        StatusCode::CONFLICT => {
            ApiError::DuplicateKey(reason.unwrap_or_else(|| DUPLICATE_STUDENT_MESSAGE.to_string()))
        }
        StatusCode::NOT_FOUND => ApiError::NotFound(reason.unwrap_or_else(|| "Not found".into())),
        _ => ApiError::Transport(failure.to_string()),
    })
}

#[async_trait]
impl RosterApi for HttpRosterApi {
    #[instrument(skip(self))]
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        let url = self.config.endpoint("courses");
        self.send(self.client.get(url), FETCH_COURSES_FAILED).await
    }

    #[instrument(skip(self))]
    async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        let url = self.config.endpoint("students");
        self.send(self.client.get(url), FETCH_STUDENTS_FAILED).await
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    async fn create_student(&self, input: &NewStudent) -> Result<Student, ApiError> {
        let url = self.config.endpoint("students");
        self.send(self.client.post(url).json(input), ADD_STUDENT_FAILED)
            .await
    }

    #[instrument(skip(self))]
    async fn fetch_user(&self, id: UserId) -> Result<UserProfile, ApiError> {
        let url = self.config.endpoint("users");
        let request = self.client.get(url).query(&[("userID", id.to_string())]);
        self.send(request, FETCH_USER_FAILED).await
    }
}
