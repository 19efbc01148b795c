use sqlx::{PgPool, Postgres, QueryBuilder};

use super::filters::HistoryFilter;
use crate::models::{AucPoint, AucSnapshot, TradeCountPoint, TradesByAsset};

/// Empty both time-series tables.
pub async fn truncate_history(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query("TRUNCATE TABLE assets_under_custody, trades_by_asset RESTART IDENTITY")
        .execute(pool)
        .await?;

    Ok(())
}

/// Insert custody points; dates already present are left untouched.
pub async fn insert_auc_points(pool: &PgPool, points: &[AucPoint]) -> anyhow::Result<u64> {
    if points.is_empty() {
        return Ok(0);
    }

    let mut qb = QueryBuilder::<Postgres>::new(
        "INSERT INTO assets_under_custody (date, total_value, equities_value, \
         fixed_income_value, alternative_assets_value, cash_value) ",
    );
    qb.push_values(points, |mut row, p| {
        row.push_bind(p.date)
            .push_bind(p.total)
            .push_bind(p.equities)
            .push_bind(p.fixed_income)
            .push_bind(p.alternatives)
            .push_bind(p.cash);
    });
    qb.push(" ON CONFLICT (date) DO NOTHING");

    let result = qb.build().execute(pool).await?;
    Ok(result.rows_affected())
}

/// Insert daily trade counts; existing (date, asset_class) pairs are left
/// untouched.
pub async fn insert_trade_counts(
    pool: &PgPool,
    counts: &[TradeCountPoint],
) -> anyhow::Result<u64> {
    if counts.is_empty() {
        return Ok(0);
    }

    let mut qb = QueryBuilder::<Postgres>::new(
        "INSERT INTO trades_by_asset (date, asset_class, trade_count) ",
    );
    qb.push_values(counts, |mut row, c| {
        row.push_bind(c.date)
            .push_bind(c.asset_class.as_str())
            .push_bind(c.trade_count);
    });
    qb.push(" ON CONFLICT (date, asset_class) DO NOTHING");

    let result = qb.build().execute(pool).await?;
    Ok(result.rows_affected())
}

/// Custody snapshots in date order.
pub async fn get_auc(pool: &PgPool, filter: &HistoryFilter) -> anyhow::Result<Vec<AucSnapshot>> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM assets_under_custody");
    filter.push_date_conditions(&mut qb);
    qb.push(" ORDER BY date ASC");

    let rows = qb.build_query_as::<AucSnapshot>().fetch_all(pool).await?;
    Ok(rows)
}

/// Daily trade counts in date order, asset classes alphabetical within a day.
pub async fn get_trades_by_asset(
    pool: &PgPool,
    filter: &HistoryFilter,
) -> anyhow::Result<Vec<TradesByAsset>> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM trades_by_asset");
    filter.push_conditions(&mut qb);
    qb.push(" ORDER BY date ASC, asset_class ASC");

    let rows = qb.build_query_as::<TradesByAsset>().fetch_all(pool).await?;
    Ok(rows)
}

pub async fn count_auc(pool: &PgPool) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM assets_under_custody")
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}

pub async fn count_trades_by_asset(pool: &PgPool) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trades_by_asset")
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}
