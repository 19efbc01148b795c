use chrono::NaiveDateTime;
use metrics::counter;
use rand::Rng;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::db::{
    corporate_action_repo, customer_repo, notification_repo, trade_repo, INSERT_BATCH_SIZE,
};
use crate::models::{AccountType, CustomerStatus, NewNotification, NotificationKind};
use crate::synthesis::corporate_actions::generate_corporate_actions;
use crate::synthesis::trades::{generate_trades, CustomerRef};

/// The fixed institutional client list: (name, account number).
pub const SEED_CUSTOMERS: [(&str, &str); 5] = [
    ("BlackRock Inc.", "C-10001"),
    ("Vanguard Group", "C-10002"),
    ("Fidelity Investments", "C-10003"),
    ("State Street Global", "C-10004"),
    ("PIMCO", "C-10005"),
];
pub const SEED_CUSTOMER_TYPE: &str = "Institutional";
pub const SEED_ACCOUNT_COUNT: usize = 10;

const fn notice(
    kind: NotificationKind,
    message: &'static str,
    time: &'static str,
    read: bool,
    category: &'static str,
) -> NewNotification {
    NewNotification {
        kind,
        message,
        time,
        read,
        category,
    }
}

/// Starter notification feed; the first two are unread.
pub const SEED_NOTIFICATIONS: [NewNotification; 9] = [
    notice(NotificationKind::Info, "New corporate action announced for AAPL", "30 minutes ago", false, "Corporate Actions"),
    notice(NotificationKind::Success, "Trade T-78946 successfully settled", "1 hour ago", false, "Trades"),
    notice(NotificationKind::Info, "Client statement generated for BlackRock Inc.", "2 hours ago", true, "Reports"),
    notice(NotificationKind::Warning, "System maintenance scheduled for tonight 22:00-23:00 UTC", "3 hours ago", true, "System"),
    notice(NotificationKind::Info, "New income posted for Fidelity account", "4 hours ago", true, "Income"),
    notice(NotificationKind::Warning, "Upcoming corporate action for MSFT requires attention", "5 hours ago", true, "Corporate Actions"),
    notice(NotificationKind::Success, "Customer onboarding completed for JP Morgan", "7 hours ago", true, "Customers"),
    notice(NotificationKind::Info, "Scheduled reports successfully generated", "1 day ago", true, "Reports"),
    notice(NotificationKind::Success, "System backup completed successfully", "1 day ago", true, "System"),
];

#[derive(Debug, Clone, Copy)]
pub struct SeedConfig {
    pub total_trades: usize,
    pub total_corporate_actions: usize,
}

impl From<&AppConfig> for SeedConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            total_trades: config.seed_total_trades,
            total_corporate_actions: config.seed_total_corporate_actions,
        }
    }
}

/// Per-table outcome of a seed run. `skipped` rows already existed;
/// `failed` rows were rejected by the database and left out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TableOutcome {
    pub inserted: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl TableOutcome {
    fn record(&mut self, table: &'static str, attempted: u64, inserted: u64) {
        let skipped = attempted.saturating_sub(inserted);
        self.inserted += inserted;
        self.skipped += skipped;
        counter!("seed_rows_inserted_total", "table" => table).increment(inserted);
        counter!("seed_rows_skipped_total", "table" => table).increment(skipped);
    }

    fn fail(&mut self, attempted: u64) {
        self.failed += attempted;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub customers: TableOutcome,
    pub accounts: TableOutcome,
    pub trades: TableOutcome,
    pub corporate_actions: TableOutcome,
    pub notifications: TableOutcome,
}

impl SeedReport {
    pub fn inserted(&self) -> u64 {
        self.customers.inserted
            + self.accounts.inserted
            + self.trades.inserted
            + self.corporate_actions.inserted
            + self.notifications.inserted
    }

    pub fn failed(&self) -> u64 {
        self.customers.failed
            + self.accounts.failed
            + self.trades.failed
            + self.corporate_actions.failed
            + self.notifications.failed
    }
}

/// Seed reference and transactional data. Safe to re-run: every insert is
/// keyed on a unique identifier and existing rows are left alone.
/// Individual rows or batches that the database rejects are logged and
/// skipped; only connectivity-level failures abort the run.
pub async fn run_seed<R: Rng + ?Sized>(
    pool: &PgPool,
    config: &SeedConfig,
    now: NaiveDateTime,
    rng: &mut R,
) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();

    tracing::info!("Seeding customers...");
    let customers = seed_customers(pool, &mut report.customers).await;
    if customers.is_empty() {
        anyhow::bail!("no customers available after seeding; cannot continue");
    }

    tracing::info!("Seeding accounts...");
    seed_accounts(pool, &customers, &mut report.accounts).await;

    tracing::info!(count = config.total_trades, "Seeding trades...");
    let trades = generate_trades(config.total_trades, &customers, now, rng);
    for (i, batch) in trades.chunks(INSERT_BATCH_SIZE).enumerate() {
        match trade_repo::insert_trades(pool, batch).await {
            Ok(inserted) => report.trades.record("trades", batch.len() as u64, inserted),
            Err(e) => {
                tracing::warn!(error = %e, batch = i, "Failed to insert trade batch, skipping");
                report.trades.fail(batch.len() as u64);
            }
        }
    }

    tracing::info!(count = config.total_corporate_actions, "Seeding corporate actions...");
    let actions = generate_corporate_actions(config.total_corporate_actions, now.date(), rng);
    for (i, batch) in actions.chunks(INSERT_BATCH_SIZE).enumerate() {
        match corporate_action_repo::insert_corporate_actions(pool, batch).await {
            Ok(inserted) => {
                report
                    .corporate_actions
                    .record("corporate_actions", batch.len() as u64, inserted)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    batch = i,
                    "Failed to insert corporate action batch, skipping"
                );
                report.corporate_actions.fail(batch.len() as u64);
            }
        }
    }

    tracing::info!("Seeding notifications...");
    match notification_repo::insert_notifications(pool, &SEED_NOTIFICATIONS).await {
        Ok(inserted) => report.notifications.record(
            "notifications",
            SEED_NOTIFICATIONS.len() as u64,
            inserted,
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to insert notifications, skipping");
            report.notifications.fail(SEED_NOTIFICATIONS.len() as u64);
        }
    }

    tracing::info!(
        inserted = report.inserted(),
        failed = report.failed(),
        trades = report.trades.inserted,
        corporate_actions = report.corporate_actions.inserted,
        "Seeding finished"
    );

    Ok(report)
}

async fn seed_customers(pool: &PgPool, outcome: &mut TableOutcome) -> Vec<CustomerRef> {
    let mut seeded = Vec::with_capacity(SEED_CUSTOMERS.len());

    for (name, account_number) in SEED_CUSTOMERS {
        match customer_repo::insert_customer(
            pool,
            name,
            account_number,
            SEED_CUSTOMER_TYPE,
            CustomerStatus::Active,
        )
        .await
        {
            Ok((id, inserted)) => {
                outcome.record("customers", 1, inserted as u64);
                seeded.push(CustomerRef {
                    id,
                    name: name.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, account_number, "Failed to seed customer, skipping");
                outcome.fail(1);
            }
        }
    }

    seeded
}

async fn seed_accounts(pool: &PgPool, customers: &[CustomerRef], outcome: &mut TableOutcome) {
    for i in 0..SEED_ACCOUNT_COUNT {
        let owner = &customers[i % customers.len()];
        let account_type = AccountType::ALL[i % AccountType::ALL.len()];
        let account_number = format!("A-2000{i}");

        match customer_repo::insert_account(pool, owner.id, &account_number, account_type.as_str())
            .await
        {
            Ok(inserted) => outcome.record("accounts", 1, inserted as u64),
            Err(e) => {
                tracing::warn!(error = %e, account_number = %account_number, "Failed to seed account, skipping");
                outcome.fail(1);
            }
        }
    }
}
