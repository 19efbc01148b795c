use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;

use opsdash::config::AppConfig;
use opsdash::services::historical::run_historical_injection;
use opsdash::services::seeder::{run_seed, SeedConfig};
use opsdash::{db, init_tracing, install_crypto_provider};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();
    install_crypto_provider();

    if let Err(e) = run().await {
        tracing::error!(error = ?e, "Setup failed");
        std::process::exit(1);
    }
    tracing::info!("Setup completed");
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let pool = db::init_pool(&config).await?;
    let result = setup(&pool, &config).await;
    pool.close().await;
    result
}

async fn setup(pool: &sqlx::PgPool, config: &AppConfig) -> anyhow::Result<()> {
    tracing::info!("Step 1/3: applying schema");
    db::run_migrations(pool).await?;

    let mut rng = StdRng::from_entropy();
    let now = Utc::now().naive_utc();

    tracing::info!("Step 2/3: seeding reference and transactional data");
    let report = run_seed(pool, &SeedConfig::from(config), now, &mut rng).await?;
    tracing::info!(inserted = report.inserted(), failed = report.failed(), "Seeding done");

    if config.setup_skip_historical {
        tracing::info!("Step 3/3: skipped (SETUP_SKIP_HISTORICAL=true)");
        return Ok(());
    }

    tracing::info!("Step 3/3: injecting historical series");
    let history = run_historical_injection(pool, now.date(), &mut rng).await?;
    tracing::info!(
        auc_rows = history.auc_rows(),
        trade_count_rows = history.trade_count_rows,
        "Historical series done"
    );
    Ok(())
}
