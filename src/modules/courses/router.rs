use crate::modules::courses::controller::get_courses;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_courses_router() -> Router<AppState> {
    Router::new().route("/", get(get_courses))
}
