use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;

use opsdash::config::AppConfig;
use opsdash::services::seeder::{run_seed, SeedConfig};
use opsdash::{db, init_tracing, install_crypto_provider};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();
    install_crypto_provider();

    if let Err(e) = run().await {
        tracing::error!(error = ?e, "Seeding failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let pool = db::init_pool(&config).await?;

    let mut rng = StdRng::from_entropy();
    let result = run_seed(&pool, &SeedConfig::from(&config), Utc::now().naive_utc(), &mut rng).await;
    pool.close().await;

    let report = result?;
    tracing::info!(
        customers = report.customers.inserted,
        accounts = report.accounts.inserted,
        trades = report.trades.inserted,
        corporate_actions = report.corporate_actions.inserted,
        notifications = report.notifications.inserted,
        skipped = report.customers.skipped
            + report.accounts.skipped
            + report.trades.skipped
            + report.corporate_actions.skipped
            + report.notifications.skipped,
        "Seed completed"
    );
    Ok(())
}
