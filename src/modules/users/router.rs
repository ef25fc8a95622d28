use crate::modules::users::controller::{get_user, get_user_by_path};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_user))
        .route("/{id}", get(get_user_by_path))
}
