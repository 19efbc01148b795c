use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{NewNotification, Notification};

/// Insert notifications, skipping any whose (message, category) already
/// exists. Returns the number of rows written.
pub async fn insert_notifications(
    pool: &PgPool,
    notifications: &[NewNotification],
) -> anyhow::Result<u64> {
    if notifications.is_empty() {
        return Ok(0);
    }

    let mut qb =
        QueryBuilder::<Postgres>::new("INSERT INTO notifications (type, message, time, read, category) ");
    qb.push_values(notifications, |mut row, n| {
        row.push_bind(n.kind.as_str())
            .push_bind(n.message)
            .push_bind(n.time)
            .push_bind(n.read)
            .push_bind(n.category);
    });
    qb.push(" ON CONFLICT (message, category) DO NOTHING");

    let result = qb.build().execute(pool).await?;
    Ok(result.rows_affected())
}

/// All notifications, newest first.
pub async fn get_notifications(pool: &PgPool) -> anyhow::Result<Vec<Notification>> {
    let notifications = sqlx::query_as::<_, Notification>(
        "SELECT * FROM notifications ORDER BY created_at DESC, id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(notifications)
}

/// Mark one notification read. Returns `None` if the id does not exist.
pub async fn mark_read(pool: &PgPool, id: i32) -> anyhow::Result<Option<Notification>> {
    let notification = sqlx::query_as::<_, Notification>(
        "UPDATE notifications SET read = TRUE WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(notification)
}

/// Mark every unread notification read. Returns the number changed.
pub async fn mark_all_read(pool: &PgPool) -> anyhow::Result<u64> {
    let result = sqlx::query("UPDATE notifications SET read = TRUE WHERE read = FALSE")
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn count_notifications(pool: &PgPool) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notifications")
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}

pub async fn count_unread(pool: &PgPool) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notifications WHERE read = FALSE")
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}
