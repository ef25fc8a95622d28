use crate::modules::students::controller::{create_student, get_students};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_students_router() -> Router<AppState> {
    Router::new().route("/", get(get_students).post(create_student))
}
