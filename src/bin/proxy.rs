use opsdash::config::ProxyConfig;
use opsdash::proxy::{create_proxy_router, ProxyState};
use opsdash::{init_tracing, install_crypto_provider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    install_crypto_provider();

    let config = ProxyConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.proxy_port);

    let state = ProxyState::new(config.backend_url.clone());
    let router = create_proxy_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        backend = %config.backend_url,
        static_dir = %config.static_dir,
        "Front door listening on {addr}"
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .await?;

    Ok(())
}
