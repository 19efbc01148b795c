use sqlx::{PgPool, Postgres, QueryBuilder};

use super::filters::TradeFilter;
use crate::models::{NewTrade, Trade, TradeStatus};

/// Insert a batch of synthesized trades. Rows whose `trade_id` already
/// exists are skipped. Returns the number of rows written.
pub async fn insert_trades(pool: &PgPool, trades: &[NewTrade]) -> anyhow::Result<u64> {
    if trades.is_empty() {
        return Ok(0);
    }

    let mut qb = QueryBuilder::<Postgres>::new(
        "INSERT INTO trades (trade_id, trade_date, customer_id, customer_name, asset_name, \
         asset_class, amount, quantity, price, side, status, settlement_date, \
         settlement_status, exchange, settlement_location) ",
    );
    qb.push_values(trades, |mut row, t| {
        row.push_bind(t.trade_id.clone())
            .push_bind(t.trade_date)
            .push_bind(t.customer_id)
            .push_bind(t.customer_name.clone())
            .push_bind(t.asset_name.clone())
            .push_bind(t.asset_class.as_str())
            .push_bind(t.amount)
            .push_bind(t.quantity)
            .push_bind(t.price)
            .push_bind(t.side.as_str())
            .push_bind(t.status.as_str())
            .push_bind(t.settlement_date)
            .push_bind(t.settlement_status.as_str())
            .push_bind(t.exchange)
            .push_bind(t.settlement_location);
    });
    qb.push(" ON CONFLICT (trade_id) DO NOTHING");

    let result = qb.build().execute(pool).await?;
    Ok(result.rows_affected())
}

/// Filtered trades, most recent first.
pub async fn get_trades(pool: &PgPool, filter: &TradeFilter) -> anyhow::Result<Vec<Trade>> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM trades");
    filter.push_conditions(&mut qb);
    qb.push(" ORDER BY trade_date DESC, id DESC");
    if let Some(limit) = filter.limit {
        qb.push(" LIMIT ").push_bind(limit);
    }

    let trades = qb.build_query_as::<Trade>().fetch_all(pool).await?;
    Ok(trades)
}

pub async fn count_trades(pool: &PgPool) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trades")
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}

pub async fn count_trades_by_status(pool: &PgPool, status: TradeStatus) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trades WHERE status = $1")
        .bind(status.as_str())
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}

/// Sum of all trade amounts; zero on an empty table.
pub async fn trading_volume(pool: &PgPool) -> anyhow::Result<f64> {
    let row: (f64,) = sqlx::query_as("SELECT COALESCE(SUM(amount), 0)::DOUBLE PRECISION FROM trades")
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}

/// Trade count per asset class, largest first.
pub async fn count_by_asset_class(pool: &PgPool) -> anyhow::Result<Vec<(String, i64)>> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT asset_class, COUNT(*) AS count
        FROM trades
        GROUP BY asset_class
        ORDER BY count DESC, asset_class
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
