use opsdash::config::AppConfig;
use opsdash::{db, init_tracing, install_crypto_provider};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();
    install_crypto_provider();

    if let Err(e) = run().await {
        tracing::error!(error = ?e, "Migration failed");
        std::process::exit(1);
    }
    tracing::info!("Migration completed");
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let pool = db::init_pool(&config).await?;

    tracing::info!("Applying schema...");
    let result = db::run_migrations(&pool).await;
    pool.close().await;
    result
}
