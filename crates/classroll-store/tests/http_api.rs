//! Drives `HttpRosterApi` and the stores against a stub server on an
//! ephemeral port.

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use classroll_config::ApiClientConfig;
use classroll_models::{CourseId, NewStudent, StudentStatus, UserId};
use classroll_store::testing::{course, profile, student};
use classroll_store::{ApiError, HttpRosterApi, RosterApi, StudentStore, UserStore};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

async fn list_students() -> impl IntoResponse {
    let algebra = course(1, "Algebra");
    Json(vec![
        student(10, "Alice", "2024", &[&algebra]),
        student(11, "Bob", "2023", &[]),
    ])
}

async fn create_student(Json(body): Json<Value>) -> impl IntoResponse {
    let email = body["email"].as_str().unwrap_or_default();
    let course_ids = body["courseIds"].as_array().cloned().unwrap_or_default();

    if course_ids.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "at least one course ID is required"})),
        )
            .into_response();
    }
    if email == "taken@example.com" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"error": "Email or other unique field already exists"})),
        )
            .into_response();
    }
    if email == "crash@example.com" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "connection reset"})),
        )
            .into_response();
    }

    let mut created = student(12, body["name"].as_str().unwrap_or_default(), "2024", &[
        &course(1, "Algebra"),
    ]);
    created.email = email.to_string();
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn get_user(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    match params.get("userID").map(String::as_str) {
        Some("00000000-0000-0000-0000-000000000001") => {
            Json(profile(1, "Ada", "Lovelace")).into_response()
        }
        Some(_) => (StatusCode::NOT_FOUND, Json(json!({"error": "User not found"}))).into_response(),
        None => (StatusCode::BAD_REQUEST, "User ID is required").into_response(),
    }
}

async fn spawn_stub() -> Arc<HttpRosterApi> {
    let app = Router::new().nest(
        "/api",
        Router::new()
            .route("/courses", get(|| async { Json(vec![course(1, "Algebra")]) }))
            .route("/students", get(list_students).post(create_student))
            .route("/users", get(get_user)),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ApiClientConfig::new(format!("http://{}/api", addr));
    Arc::new(HttpRosterApi::new(config).unwrap())
}

fn new_student(email: &str, course_ids: Vec<CourseId>) -> NewStudent {
    NewStudent {
        name: "Carol".into(),
        email: email.into(),
        cohort: "2024".into(),
        status: StudentStatus::Active,
        course_ids,
    }
}

#[tokio::test]
async fn test_list_endpoints_decode() {
    let api = spawn_stub().await;

    let courses = api.list_courses().await.unwrap();
    assert_eq!(courses[0].name, "Algebra");

    let students = api.list_students().await.unwrap();
    assert_eq!(students.len(), 2);
    assert_eq!(students[0].courses[0].code, "ALGEBRA-1");
}

#[tokio::test]
async fn test_create_maps_status_codes() {
    let api = spawn_stub().await;

    let created = api
        .create_student(&new_student("carol@example.com", vec![CourseId::from_u128(1)]))
        .await
        .unwrap();
    assert_eq!(created.email, "carol@example.com");

    let err = api
        .create_student(&new_student("carol@example.com", Vec::new()))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Validation("at least one course ID is required".into())
    );

    let err = api
        .create_student(&new_student("taken@example.com", vec![CourseId::from_u128(1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::DuplicateKey(_)));

    let err = api
        .create_student(&new_student("crash@example.com", vec![CourseId::from_u128(1)]))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Transport("Failed to add student".into()));
}

#[tokio::test]
async fn test_fetch_user_sends_query_parameter() {
    let api = spawn_stub().await;

    let user = api.fetch_user(UserId::from_u128(1)).await.unwrap();
    assert_eq!(user.display_name(), "Ada Lovelace");

    let err = api.fetch_user(UserId::from_u128(2)).await.unwrap_err();
    assert_eq!(err, ApiError::NotFound("User not found".into()));
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpRosterApi::new(ApiClientConfig::new(format!("http://{}/api", addr))).unwrap();
    let err = api.list_students().await.unwrap_err();
    match err {
        ApiError::Transport(message) => assert!(message.starts_with("Failed to fetch students")),
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_stores_over_http() {
    let api = spawn_stub().await;
    let students = StudentStore::new(api.clone());
    let users = UserStore::new(api.clone());

    students.fetch_all().await;
    students.reset_filter_by("", "Algebra");
    assert_eq!(students.snapshot().filtered_students.len(), 1);

    students
        .create(new_student("taken@example.com", vec![CourseId::from_u128(1)]))
        .await;
    let state = students.snapshot();
    assert_eq!(state.students.len(), 2);
    assert_eq!(
        state.error.as_deref(),
        Some("Email or other unique field already exists")
    );

    users.fetch_by_id(UserId::from_u128(1)).await;
    users.fetch_by_id(UserId::from_u128(3)).await;
    let state = users.snapshot();
    assert!(state.user.is_some());
    assert_eq!(state.error.as_deref(), Some("User not found"));
}
