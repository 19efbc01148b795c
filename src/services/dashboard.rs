use std::time::Instant;

use chrono::NaiveDate;
use metrics::histogram;
use serde::Serialize;
use sqlx::PgPool;

use crate::db::filters::HistoryFilter;
use crate::db::{corporate_action_repo, customer_repo, history_repo, trade_repo};
use crate::models::{
    AucSnapshot, CorporateAction, CorporateActionStatus, CorporateActionType, CustomerStatus,
    Priority, TradeStatus,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_customers: i64,
    pub active_customers: i64,
    pub total_accounts: i64,
    pub total_trades: i64,
    pub trading_volume: f64,
    pub pending_trades: i64,
    pub trades_by_asset_class: Vec<LabelCount>,
    pub open_events: i64,
    pub corporate_actions: CorporateActionStats,
    pub deal_processing: DealProcessing,
    pub assets_under_custody: AucSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: &'static str,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub action_type: &'static str,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityCount {
    pub priority: &'static str,
    pub count: i64,
}

/// Dashboard clients read `high_priority` and `pending_elections` in
/// snake case, unlike the rest of the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorporateActionStats {
    pub mandatory: i64,
    pub voluntary: i64,
    pub total: i64,
    pub high_priority: i64,
    pub pending_elections: i64,
    pub status: Vec<StatusCount>,
    pub types: Vec<TypeCount>,
    pub priorities: Vec<PriorityCount>,
}

impl CorporateActionStats {
    /// Single pass over the full corporate-action table.
    pub fn from_actions(actions: &[CorporateAction]) -> Self {
        let count = |pred: &dyn Fn(&CorporateAction) -> bool| -> i64 {
            actions.iter().filter(|a| pred(a)).count() as i64
        };

        Self {
            mandatory: count(&|a| a.mandatory),
            voluntary: count(&|a| !a.mandatory),
            total: actions.len() as i64,
            high_priority: count(&|a| a.priority == Priority::High.as_str()),
            pending_elections: count(&|a| a.pending_election),
            status: CorporateActionStatus::ALL
                .iter()
                .map(|s| StatusCount {
                    status: s.as_str(),
                    count: count(&|a| a.status == s.as_str()),
                })
                .collect(),
            types: CorporateActionType::ALL
                .iter()
                .map(|t| TypeCount {
                    action_type: t.as_str(),
                    count: count(&|a| a.action_type == t.as_str()),
                })
                .collect(),
            priorities: Priority::ALL
                .iter()
                .map(|p| PriorityCount {
                    priority: p.as_str(),
                    count: count(&|a| a.priority == p.as_str()),
                })
                .collect(),
        }
    }

    fn status_count(&self, status: CorporateActionStatus) -> i64 {
        self.status
            .iter()
            .find(|s| s.status == status.as_str())
            .map_or(0, |s| s.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealProcessing {
    pub completed: i64,
    pub pending: i64,
    pub processing: i64,
    pub failed: i64,
}

impl DealProcessing {
    /// Canceled actions are reported as failed deals.
    pub fn from_stats(stats: &CorporateActionStats) -> Self {
        Self {
            completed: stats.status_count(CorporateActionStatus::Completed),
            pending: stats.status_count(CorporateActionStatus::Pending),
            processing: stats.status_count(CorporateActionStatus::Processing),
            failed: stats.status_count(CorporateActionStatus::Canceled),
        }
    }
}

/// Actions still needing attention. Unrecognised statuses count as open.
pub fn count_open_events(actions: &[CorporateAction]) -> i64 {
    actions
        .iter()
        .filter(|a| CorporateActionStatus::from_str(&a.status).map_or(true, |s| s.is_open()))
        .count() as i64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelValue {
    pub label: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AucHistoryPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AucSummary {
    pub total: f64,
    pub as_of: Option<NaiveDate>,
    pub by_asset_class: Vec<LabelValue>,
    pub history: Vec<AucHistoryPoint>,
}

impl AucSummary {
    /// `history` must be in ascending date order; the latest snapshot is
    /// its last element.
    pub fn from_history(history: &[AucSnapshot]) -> Self {
        let latest = history.last();
        let value = |f: fn(&AucSnapshot) -> f64| latest.map_or(0.0, f);

        Self {
            total: value(|s| s.total_value),
            as_of: latest.map(|s| s.date),
            by_asset_class: vec![
                LabelValue {
                    label: "Equities",
                    value: value(|s| s.equities_value),
                },
                LabelValue {
                    label: "Fixed Income",
                    value: value(|s| s.fixed_income_value),
                },
                LabelValue {
                    label: "Alternative Assets",
                    value: value(|s| s.alternative_assets_value),
                },
                LabelValue {
                    label: "Cash & Equivalents",
                    value: value(|s| s.cash_value),
                },
            ],
            history: history
                .iter()
                .map(|s| AucHistoryPoint {
                    date: s.date,
                    value: s.total_value,
                })
                .collect(),
        }
    }
}

/// Build the dashboard summary. Read-only; an empty database produces
/// zeros and an empty history.
pub async fn build_summary(pool: &PgPool) -> anyhow::Result<DashboardSummary> {
    let started = Instant::now();

    let total_customers = customer_repo::count_customers(pool).await?;
    let active_customers =
        customer_repo::count_customers_by_status(pool, CustomerStatus::Active).await?;
    let total_accounts = customer_repo::count_accounts(pool).await?;
    let total_trades = trade_repo::count_trades(pool).await?;
    let trading_volume = trade_repo::trading_volume(pool).await?;
    let pending_trades = trade_repo::count_trades_by_status(pool, TradeStatus::Pending).await?;
    let trades_by_asset_class = trade_repo::count_by_asset_class(pool)
        .await?
        .into_iter()
        .map(|(label, count)| LabelCount { label, count })
        .collect();

    let actions = corporate_action_repo::get_all(pool).await?;
    let corporate_actions = CorporateActionStats::from_actions(&actions);
    let deal_processing = DealProcessing::from_stats(&corporate_actions);

    let history = history_repo::get_auc(pool, &HistoryFilter::default()).await?;

    histogram!("dashboard_summary_seconds").record(started.elapsed().as_secs_f64());

    Ok(DashboardSummary {
        total_customers,
        active_customers,
        total_accounts,
        total_trades,
        trading_volume,
        pending_trades,
        trades_by_asset_class,
        open_events: count_open_events(&actions),
        corporate_actions,
        deal_processing,
        assets_under_custody: AucSummary::from_history(&history),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn action(
        id: i32,
        action_type: CorporateActionType,
        status: CorporateActionStatus,
        priority: Priority,
        mandatory: bool,
        pending_election: bool,
    ) -> CorporateAction {
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        CorporateAction {
            id,
            action_id: format!("CA-{}", 200_000 + id),
            action_type: action_type.as_str().into(),
            asset_name: "Apple Inc. Equity".into(),
            mandatory,
            announcement_date: day,
            record_date: Some(day),
            payment_date: Some(day),
            status: status.as_str().into(),
            priority: priority.as_str().into(),
            pending_election,
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn snapshot(day: u32, total: f64) -> AucSnapshot {
        AucSnapshot {
            id: day as i32,
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            total_value: total,
            equities_value: total * 0.4,
            fixed_income_value: total * 0.4,
            alternative_assets_value: total * 0.1,
            cash_value: total * 0.1,
            created_at: ts(),
        }
    }

    #[test]
    fn test_empty_actions_all_zero() {
        let stats = CorporateActionStats::from_actions(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.mandatory + stats.voluntary, 0);
        assert!(stats.status.iter().all(|s| s.count == 0));
        assert_eq!(stats.status.len(), 5);
        assert_eq!(stats.types.len(), 5);
        assert_eq!(count_open_events(&[]), 0);
        assert_eq!(
            DealProcessing::from_stats(&stats),
            DealProcessing {
                completed: 0,
                pending: 0,
                processing: 0,
                failed: 0
            }
        );
    }

    #[test]
    fn test_breakdowns() {
        use CorporateActionStatus::*;
        use CorporateActionType::*;

        let actions = vec![
            action(1, Dividend, Completed, Priority::Normal, true, false),
            action(2, Dividend, Pending, Priority::Normal, true, false),
            action(3, RightsIssue, Announced, Priority::High, false, true),
            action(4, Merger, Processing, Priority::High, true, false),
            action(5, StockSplit, Canceled, Priority::Low, true, false),
        ];
        let stats = CorporateActionStats::from_actions(&actions);

        assert_eq!(stats.total, 5);
        assert_eq!(stats.mandatory, 4);
        assert_eq!(stats.voluntary, 1);
        assert_eq!(stats.high_priority, 2);
        assert_eq!(stats.pending_elections, 1);
        assert_eq!(stats.status_count(Completed), 1);
        assert_eq!(stats.status_count(Canceled), 1);

        let dividends = stats.types.iter().find(|t| t.action_type == "Dividend").unwrap();
        assert_eq!(dividends.count, 2);
        let redemptions = stats.types.iter().find(|t| t.action_type == "Redemption").unwrap();
        assert_eq!(redemptions.count, 0);

        assert_eq!(count_open_events(&actions), 3);
        assert_eq!(
            DealProcessing::from_stats(&stats),
            DealProcessing {
                completed: 1,
                pending: 1,
                processing: 1,
                failed: 1
            }
        );
    }

    #[test]
    fn test_auc_summary_empty() {
        let summary = AucSummary::from_history(&[]);
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.as_of, None);
        assert!(summary.history.is_empty());
        assert!(summary.by_asset_class.iter().all(|c| c.value == 0.0));
    }

    #[test]
    fn test_auc_summary_uses_latest() {
        let history = vec![snapshot(1, 100.0), snapshot(2, 110.0), snapshot(3, 120.0)];
        let summary = AucSummary::from_history(&history);

        assert_eq!(summary.total, 120.0);
        assert_eq!(summary.as_of, NaiveDate::from_ymd_opt(2025, 1, 3));
        assert_eq!(summary.by_asset_class[0].value, 48.0);
        assert_eq!(summary.history.len(), 3);
        assert_eq!(summary.history[0].value, 100.0);
    }

    #[test]
    fn test_corporate_action_stats_wire_names() {
        let stats = CorporateActionStats::from_actions(&[]);
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("high_priority").is_some());
        assert!(json.get("pending_elections").is_some());
        assert!(json.get("highPriority").is_none());
        assert_eq!(json["types"][0]["type"], "Dividend");
    }
}
