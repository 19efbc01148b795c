use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;

use opsdash::config::AppConfig;
use opsdash::services::historical::run_historical_injection;
use opsdash::{db, init_tracing, install_crypto_provider};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();
    install_crypto_provider();

    if let Err(e) = run().await {
        tracing::error!(error = ?e, "Historical data injection failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let pool = db::init_pool(&config).await?;

    let mut rng = StdRng::from_entropy();
    let result = run_historical_injection(&pool, Utc::now().date_naive(), &mut rng).await;
    pool.close().await;

    let report = result?;
    tracing::info!(
        start = %report.start_date,
        end = %report.end_date,
        auc_rows = report.auc_rows(),
        trade_count_rows = report.trade_count_rows,
        "Historical data injection completed"
    );
    Ok(())
}
