use classroll_config::{CorsConfig, DatabaseConfig};
use classroll_db::init_db_pool;
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state(database_config: &DatabaseConfig) -> Result<AppState, sqlx::Error> {
    Ok(AppState {
        db: init_db_pool(database_config).await?,
        cors_config: CorsConfig::from_env(),
    })
}
