pub mod corporate_action_repo;
pub mod customer_repo;
pub mod filters;
pub mod history_repo;
pub mod notification_repo;
pub mod trade_repo;

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::AppConfig;

/// Rows per multi-row INSERT statement.
pub const INSERT_BATCH_SIZE: usize = 50;

pub async fn init_pool(config: &AppConfig) -> anyhow::Result<PgPool> {
    let options = PgConnectOptions::from_str(&config.database_url)?.ssl_mode(config.ssl_mode());

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(options)
        .await?;

    // Verify connectivity
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}

/// Apply the schema. Every statement is `IF NOT EXISTS`, and sqlx records
/// applied versions, so running this repeatedly is a no-op.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
