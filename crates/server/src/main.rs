use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // DB path: use WATCHLOG_DB env or default
    let db_path = std::env::var("WATCHLOG_DB").unwrap_or_else(|_| "watchlog.db".to_string());
    info!(db_path = %db_path, "connecting to database");

    let pool = watchlog_db::connect(&db_path)
        .await
        .context("failed to connect to database")?;

    // Run migrations
    watchlog_db::migrate::run(&pool)
        .await
        .context("failed to run migrations")?;
    info!("migrations complete");

    let app_state = watchlog_server::state::AppState { db: pool };
    let app = watchlog_server::routes::build_router(app_state);

    let bind_addr = std::env::var("WATCHLOG_BIND").unwrap_or_else(|_| "0.0.0.0:8099".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
