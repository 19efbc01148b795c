use sqlx::PgPool;

use crate::models::{Account, Customer, CustomerStatus};

/// Insert a customer unless its account number already exists.
/// Returns the row id either way, plus whether a row was written.
pub async fn insert_customer(
    pool: &PgPool,
    name: &str,
    account_number: &str,
    customer_type: &str,
    status: CustomerStatus,
) -> anyhow::Result<(i32, bool)> {
    let inserted: Option<(i32,)> = sqlx::query_as(
        r#"
        INSERT INTO customers (name, account_number, type, status)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (account_number) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(account_number)
    .bind(customer_type)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;

    if let Some((id,)) = inserted {
        return Ok((id, true));
    }

    let (id,): (i32,) = sqlx::query_as("SELECT id FROM customers WHERE account_number = $1")
        .bind(account_number)
        .fetch_one(pool)
        .await?;

    Ok((id, false))
}

/// Insert an account unless its account number already exists.
/// Returns true if a row was written.
pub async fn insert_account(
    pool: &PgPool,
    customer_id: i32,
    account_number: &str,
    account_type: &str,
) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO accounts (customer_id, account_number, type, status)
        VALUES ($1, $2, $3, 'active')
        ON CONFLICT (account_number) DO NOTHING
        "#,
    )
    .bind(customer_id)
    .bind(account_number)
    .bind(account_type)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_customers(pool: &PgPool) -> anyhow::Result<Vec<Customer>> {
    let customers = sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(customers)
}

pub async fn get_customers_by_status(
    pool: &PgPool,
    status: CustomerStatus,
) -> anyhow::Result<Vec<Customer>> {
    let customers =
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE status = $1 ORDER BY id")
            .bind(status.as_str())
            .fetch_all(pool)
            .await?;

    Ok(customers)
}

pub async fn get_accounts(pool: &PgPool) -> anyhow::Result<Vec<Account>> {
    let accounts = sqlx::query_as::<_, Account>("SELECT * FROM accounts ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(accounts)
}

pub async fn get_accounts_by_customer(
    pool: &PgPool,
    customer_id: i32,
) -> anyhow::Result<Vec<Account>> {
    let accounts =
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE customer_id = $1 ORDER BY id")
            .bind(customer_id)
            .fetch_all(pool)
            .await?;

    Ok(accounts)
}

pub async fn count_customers(pool: &PgPool) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}

pub async fn count_customers_by_status(
    pool: &PgPool,
    status: CustomerStatus,
) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers WHERE status = $1")
        .bind(status.as_str())
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}

pub async fn count_accounts(pool: &PgPool) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}
