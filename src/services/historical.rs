use chrono::{Duration, NaiveDate};
use metrics::counter;
use rand::Rng;
use sqlx::PgPool;

use crate::db::{history_repo, INSERT_BATCH_SIZE};
use crate::models::{AucPoint, TradeCountPoint};
use crate::synthesis::auc::{self, DAYS_PER_WEEK, TOTAL_WEEKS};
use crate::synthesis::{history_start, trade_counts};

/// Days covered by the generated series.
pub const HISTORY_DAYS: u32 = TOTAL_WEEKS * DAYS_PER_WEEK;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoricalReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub weekly_rows: u64,
    pub daily_rows: u64,
    pub trade_count_rows: u64,
}

impl HistoricalReport {
    pub fn auc_rows(&self) -> u64 {
        self.weekly_rows + self.daily_rows
    }
}

/// Wipe both series tables and regenerate two years ending at `today`.
pub async fn run_historical_injection<R: Rng + ?Sized>(
    pool: &PgPool,
    today: NaiveDate,
    rng: &mut R,
) -> anyhow::Result<HistoricalReport> {
    tracing::info!("Clearing existing historical data...");
    history_repo::truncate_history(pool).await?;

    populate_history(pool, today, rng).await
}

/// Generate and insert the series without truncating first. Dates (and
/// date/asset-class pairs) already present are left as they are, so the
/// row counts in the report only include newly written rows.
pub async fn populate_history<R: Rng + ?Sized>(
    pool: &PgPool,
    today: NaiveDate,
    rng: &mut R,
) -> anyhow::Result<HistoricalReport> {
    let start = history_start(today);
    let end = start + Duration::days(HISTORY_DAYS as i64 - 1);

    tracing::info!(%start, %end, weeks = TOTAL_WEEKS, "Generating weekly assets under custody");
    let anchors = auc::generate_weekly(start, rng);
    let weekly = &anchors[..TOTAL_WEEKS as usize];
    let weekly_rows = insert_auc(pool, weekly).await?;
    tracing::info!(rows = weekly_rows, "Weekly AUC rows inserted");

    tracing::info!("Interpolating daily AUC points...");
    let daily = auc::interpolate_daily(&anchors, rng);
    let daily_rows = insert_auc(pool, &daily).await?;
    tracing::info!(rows = daily_rows, "Daily AUC rows inserted");

    tracing::info!(days = HISTORY_DAYS, "Generating daily trade counts by asset class");
    let counts = trade_counts::generate_daily_counts(start, HISTORY_DAYS, rng);
    let trade_count_rows = insert_counts(pool, &counts).await?;
    tracing::info!(rows = trade_count_rows, "Trade count rows inserted");

    Ok(HistoricalReport {
        start_date: start,
        end_date: end,
        weekly_rows,
        daily_rows,
        trade_count_rows,
    })
}

async fn insert_auc(pool: &PgPool, points: &[AucPoint]) -> anyhow::Result<u64> {
    let mut inserted = 0;
    for (i, batch) in points.chunks(INSERT_BATCH_SIZE).enumerate() {
        inserted += history_repo::insert_auc_points(pool, batch).await?;
        if i % 10 == 0 {
            tracing::debug!(batch = i, inserted, "AUC batch written");
        }
    }
    counter!("historical_rows_inserted_total", "table" => "assets_under_custody").increment(inserted);
    Ok(inserted)
}

async fn insert_counts(pool: &PgPool, counts: &[TradeCountPoint]) -> anyhow::Result<u64> {
    let mut inserted = 0;
    for (i, batch) in counts.chunks(INSERT_BATCH_SIZE).enumerate() {
        inserted += history_repo::insert_trade_counts(pool, batch).await?;
        if i % 10 == 0 {
            tracing::debug!(batch = i, inserted, "Trade count batch written");
        }
    }
    counter!("historical_rows_inserted_total", "table" => "trades_by_asset").increment(inserted);
    Ok(inserted)
}
