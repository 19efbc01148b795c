use sqlx::{PgPool, Postgres, QueryBuilder};

use super::filters::CorporateActionFilter;
use crate::models::{CorporateAction, NewCorporateAction};

/// Insert a batch of synthesized corporate actions, skipping existing
/// `action_id`s. Returns the number of rows written.
pub async fn insert_corporate_actions(
    pool: &PgPool,
    actions: &[NewCorporateAction],
) -> anyhow::Result<u64> {
    if actions.is_empty() {
        return Ok(0);
    }

    let mut qb = QueryBuilder::<Postgres>::new(
        "INSERT INTO corporate_actions (action_id, type, asset_name, mandatory, \
         announcement_date, record_date, payment_date, status, priority, pending_election) ",
    );
    qb.push_values(actions, |mut row, a| {
        row.push_bind(a.action_id.clone())
            .push_bind(a.action_type.as_str())
            .push_bind(a.asset_name.clone())
            .push_bind(a.mandatory)
            .push_bind(a.announcement_date)
            .push_bind(a.record_date)
            .push_bind(a.payment_date)
            .push_bind(a.status.as_str())
            .push_bind(a.priority.as_str())
            .push_bind(a.pending_election);
    });
    qb.push(" ON CONFLICT (action_id) DO NOTHING");

    let result = qb.build().execute(pool).await?;
    Ok(result.rows_affected())
}

/// Filtered corporate actions, most recently announced first.
pub async fn get_corporate_actions(
    pool: &PgPool,
    filter: &CorporateActionFilter,
) -> anyhow::Result<Vec<CorporateAction>> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM corporate_actions");
    filter.push_conditions(&mut qb);
    qb.push(" ORDER BY announcement_date DESC, id DESC");

    let actions = qb.build_query_as::<CorporateAction>().fetch_all(pool).await?;
    Ok(actions)
}

/// Every corporate action, unordered. Used for in-memory aggregation.
pub async fn get_all(pool: &PgPool) -> anyhow::Result<Vec<CorporateAction>> {
    let actions = sqlx::query_as::<_, CorporateAction>("SELECT * FROM corporate_actions")
        .fetch_all(pool)
        .await?;

    Ok(actions)
}

pub async fn count_corporate_actions(pool: &PgPool) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM corporate_actions")
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}
