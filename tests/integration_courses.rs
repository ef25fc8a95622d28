mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use classroll::testing::create_test_course;
use common::{json_body, setup_test_app};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_list_courses_empty(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = Request::builder()
        .uri("/api/courses")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!([]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_courses_sorted_by_name(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    create_test_course(&mut tx, "Physics", "PHY-101").await.unwrap();
    create_test_course(&mut tx, "Algebra", "ALG-101").await.unwrap();
    tx.commit().await.unwrap();

    let app = setup_test_app(pool);
    let request = Request::builder()
        .uri("/api/courses")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let courses = body.as_array().unwrap();
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0]["name"], "Algebra");
    assert_eq!(courses[0]["code"], "ALG-101");
    assert_eq!(courses[0]["avatar"], "/avatars/alg-101.png");
    assert_eq!(courses[1]["name"], "Physics");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}
