use anyhow::{Context, anyhow};
use classroll_core::AppError;
use classroll_models::{UserId, UserProfile};
use sqlx::PgPool;
use tracing::instrument;

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: UserId) -> Result<UserProfile, AppError> {
        sqlx::query_as::<_, UserProfile>(
            r#"SELECT id, email, first_name, last_name, avatar, theme, created_at, updated_at
               FROM users
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }
}
