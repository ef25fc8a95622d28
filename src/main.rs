use classroll::logging::init_tracing;
use classroll::metrics::{init_metrics, metrics_router};
use classroll::router::init_router;
use classroll::state::init_app_state;
use classroll_config::{DatabaseConfig, ServerConfig};
use classroll_db::run_migrations;
use dotenvy::dotenv;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    if let Err(e) = init_tracing() {
        eprintln!("⚠️  Failed to initialize file logging: {}", e);
    }

    let database_config = DatabaseConfig::from_env();
    let state = init_app_state(&database_config).await.inspect_err(|e| {
        error!(error = %e, "Failed to connect to database");
    })?;
    run_migrations(&state.db).await?;

    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_router(handle));
    }

    let server_config = ServerConfig::from_env();
    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(address = %address, "Server listening");
    println!("🚀 Server running on http://{}", address);
    println!("📚 Swagger UI available at http://{}/swagger-ui", address);
    println!("📖 Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app).await?;
    Ok(())
}
