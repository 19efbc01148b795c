//! Filter criteria for the read endpoints.
//!
//! Each criterion is optional and independent; present criteria are ANDed.
//! Raw query-string parameters are validated into typed filters once, and
//! the typed filters append bound conditions onto a `QueryBuilder`.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

use crate::models::{
    AssetClass, CorporateActionStatus, CorporateActionType, CustomerStatus, Priority,
    SettlementStatus, TradeSide, TradeStatus,
};

/// Upper bound for the trade query result cap.
pub const MAX_TRADE_LIMIT: i64 = 10_000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("startDate {start} is after endDate {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("unknown {field}: {value}")]
    UnknownValue { field: &'static str, value: String },

    #[error("invalid {field}: {value}")]
    Malformed { field: &'static str, value: String },

    #[error("limit must be between 1 and 10000, got {0}")]
    InvalidLimit(i64),
}

// ---------------------------------------------------------------------------
// Date range
// ---------------------------------------------------------------------------

/// Inclusive calendar-date bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, FilterError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(FilterError::InvertedRange { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// Bounds against a DATE column.
    fn push_date(&self, clause: &mut WhereClause<'_, '_>, column: &str) {
        if let Some(start) = self.start {
            clause.and().push(column).push(" >= ").push_bind(start);
        }
        if let Some(end) = self.end {
            clause.and().push(column).push(" <= ").push_bind(end);
        }
    }

    /// Bounds against a TIMESTAMP column; the end date covers its whole day.
    fn push_timestamp(&self, clause: &mut WhereClause<'_, '_>, column: &str) {
        if let Some(start) = self.start {
            clause
                .and()
                .push(column)
                .push(" >= ")
                .push_bind(start_of_day(start));
        }
        if let Some(next) = self.end.and_then(|end| end.checked_add_days(Days::new(1))) {
            clause
                .and()
                .push(column)
                .push(" < ")
                .push_bind(start_of_day(next));
        }
    }
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Emits `WHERE` before the first condition and `AND` before the rest.
struct WhereClause<'q, 'b> {
    qb: &'b mut QueryBuilder<'q, Postgres>,
    started: bool,
}

impl<'q, 'b> WhereClause<'q, 'b> {
    fn new(qb: &'b mut QueryBuilder<'q, Postgres>) -> Self {
        Self { qb, started: false }
    }

    fn and(&mut self) -> &mut QueryBuilder<'q, Postgres> {
        self.qb.push(if self.started { " AND " } else { " WHERE " });
        self.started = true;
        &mut *self.qb
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_opt<T>(
    field: &'static str,
    value: Option<String>,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, FilterError> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => parse(&raw)
            .map(Some)
            .ok_or(FilterError::UnknownValue { field, value: raw }),
    }
}

/// Like `parse_opt`, for free-form values (dates, numbers, flags) where
/// a parse failure means malformed input rather than an unknown label.
fn parse_scalar<T: std::str::FromStr>(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<T>, FilterError> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| FilterError::Malformed { field, value: raw }),
    }
}

fn parse_date_range(start: Option<String>, end: Option<String>) -> Result<DateRange, FilterError> {
    DateRange::new(
        parse_scalar("startDate", start)?,
        parse_scalar("endDate", end)?,
    )
}

// ---------------------------------------------------------------------------
// Customers and accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerParams {
    pub status: Option<String>,
}

impl CustomerParams {
    pub fn status(self) -> Result<Option<CustomerStatus>, FilterError> {
        parse_opt("status", self.status, CustomerStatus::from_str)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountParams {
    pub customer_id: Option<String>,
}

impl AccountParams {
    pub fn customer_id(self) -> Result<Option<i32>, FilterError> {
        parse_scalar("customerId", self.customer_id)
    }
}

// ---------------------------------------------------------------------------
// Trades
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub asset_class: Option<String>,
    pub status: Option<String>,
    pub settlement_status: Option<String>,
    pub side: Option<String>,
    pub customer_id: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeFilter {
    pub date_range: DateRange,
    pub asset_class: Option<AssetClass>,
    pub status: Option<TradeStatus>,
    pub settlement_status: Option<SettlementStatus>,
    pub side: Option<TradeSide>,
    pub customer_id: Option<i32>,
    pub limit: Option<i64>,
}

impl TryFrom<TradeParams> for TradeFilter {
    type Error = FilterError;

    fn try_from(params: TradeParams) -> Result<Self, Self::Error> {
        let limit: Option<i64> = parse_scalar("limit", params.limit)?;
        if let Some(limit) = limit {
            if !(1..=MAX_TRADE_LIMIT).contains(&limit) {
                return Err(FilterError::InvalidLimit(limit));
            }
        }

        Ok(Self {
            date_range: parse_date_range(params.start_date, params.end_date)?,
            asset_class: parse_opt("assetClass", params.asset_class, AssetClass::from_str)?,
            status: parse_opt("status", params.status, TradeStatus::from_str)?,
            settlement_status: parse_opt(
                "settlementStatus",
                params.settlement_status,
                SettlementStatus::from_str,
            )?,
            side: parse_opt("side", params.side, TradeSide::from_str)?,
            customer_id: parse_scalar("customerId", params.customer_id)?,
            limit,
        })
    }
}

impl TradeFilter {
    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        let mut clause = WhereClause::new(qb);
        self.date_range.push_timestamp(&mut clause, "trade_date");
        if let Some(asset_class) = self.asset_class {
            clause.and().push("asset_class = ").push_bind(asset_class.as_str());
        }
        if let Some(status) = self.status {
            clause.and().push("status = ").push_bind(status.as_str());
        }
        if let Some(settlement_status) = self.settlement_status {
            clause
                .and()
                .push("settlement_status = ")
                .push_bind(settlement_status.as_str());
        }
        if let Some(side) = self.side {
            clause.and().push("side = ").push_bind(side.as_str());
        }
        if let Some(customer_id) = self.customer_id {
            clause.and().push("customer_id = ").push_bind(customer_id);
        }
    }
}

// ---------------------------------------------------------------------------
// Corporate actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporateActionParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(rename = "type")]
    pub action_type: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub mandatory: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorporateActionFilter {
    pub date_range: DateRange,
    pub action_type: Option<CorporateActionType>,
    pub status: Option<CorporateActionStatus>,
    pub priority: Option<Priority>,
    pub mandatory: Option<bool>,
}

impl TryFrom<CorporateActionParams> for CorporateActionFilter {
    type Error = FilterError;

    fn try_from(params: CorporateActionParams) -> Result<Self, Self::Error> {
        Ok(Self {
            date_range: parse_date_range(params.start_date, params.end_date)?,
            action_type: parse_opt("type", params.action_type, CorporateActionType::from_str)?,
            status: parse_opt("status", params.status, CorporateActionStatus::from_str)?,
            priority: parse_opt("priority", params.priority, Priority::from_str)?,
            mandatory: parse_scalar("mandatory", params.mandatory)?,
        })
    }
}

impl CorporateActionFilter {
    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        let mut clause = WhereClause::new(qb);
        self.date_range.push_date(&mut clause, "announcement_date");
        if let Some(action_type) = self.action_type {
            clause.and().push("type = ").push_bind(action_type.as_str());
        }
        if let Some(status) = self.status {
            clause.and().push("status = ").push_bind(status.as_str());
        }
        if let Some(priority) = self.priority {
            clause.and().push("priority = ").push_bind(priority.as_str());
        }
        if let Some(mandatory) = self.mandatory {
            clause.and().push("mandatory = ").push_bind(mandatory);
        }
    }
}

// ---------------------------------------------------------------------------
// Time series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub asset_class: Option<String>,
}

/// Filter for the daily series tables. `asset_class` only applies to
/// trades_by_asset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    pub date_range: DateRange,
    pub asset_class: Option<AssetClass>,
}

impl TryFrom<HistoryParams> for HistoryFilter {
    type Error = FilterError;

    fn try_from(params: HistoryParams) -> Result<Self, Self::Error> {
        Ok(Self {
            date_range: parse_date_range(params.start_date, params.end_date)?,
            asset_class: parse_opt("assetClass", params.asset_class, AssetClass::from_str)?,
        })
    }
}

impl HistoryFilter {
    pub fn push_date_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        let mut clause = WhereClause::new(qb);
        self.date_range.push_date(&mut clause, "date");
    }

    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        let mut clause = WhereClause::new(qb);
        self.date_range.push_date(&mut clause, "date");
        if let Some(asset_class) = self.asset_class {
            clause.and().push("asset_class = ").push_bind(asset_class.as_str());
        }
    }
}
