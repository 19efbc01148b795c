use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::AssetClass;

/// Database row for the assets_under_custody table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AucSnapshot {
    pub id: i32,
    pub date: NaiveDate,
    pub total_value: f64,
    pub equities_value: f64,
    pub fixed_income_value: f64,
    pub alternative_assets_value: f64,
    pub cash_value: f64,
    pub created_at: NaiveDateTime,
}

/// One day of synthesized custody values. `cash` is always the remainder
/// of `total` after the other three classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AucPoint {
    pub date: NaiveDate,
    pub total: f64,
    pub equities: f64,
    pub fixed_income: f64,
    pub alternatives: f64,
    pub cash: f64,
}

impl AucPoint {
    /// Sum of the four allocation buckets.
    pub fn allocated(&self) -> f64 {
        self.equities + self.fixed_income + self.alternatives + self.cash
    }
}

/// Database row for the trades_by_asset table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TradesByAsset {
    pub id: i32,
    pub date: NaiveDate,
    pub asset_class: String,
    pub trade_count: i32,
    pub created_at: NaiveDateTime,
}

/// A synthesized daily trade count for one asset class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeCountPoint {
    pub date: NaiveDate,
    pub asset_class: AssetClass,
    pub trade_count: i32,
}
