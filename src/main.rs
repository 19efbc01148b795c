use opsdash::api::router::create_router;
use opsdash::config::AppConfig;
use opsdash::{db, init_tracing, install_crypto_provider, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    install_crypto_provider();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!(env = %config.app_env, "Connecting to database...");
    let db = db::init_pool(&config).await?;
    tracing::info!("Database connected");

    let metrics_handle = metrics::init_metrics()?;

    let state = AppState {
        db: db.clone(),
        config,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down, closing database pool");
    db.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
