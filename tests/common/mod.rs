use axum::Router;
use axum::body::Body;
use axum::http::Response;
use classroll::router::init_router;
use classroll::state::AppState;
use classroll_config::CorsConfig;
use http_body_util::BodyExt;
use sqlx::PgPool;

pub fn setup_test_app(pool: PgPool) -> Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
