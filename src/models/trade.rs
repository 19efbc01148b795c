use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Database row for the trades table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: i32,
    pub trade_id: String,
    pub trade_date: NaiveDateTime,
    pub customer_id: Option<i32>,
    pub customer_name: Option<String>,
    pub asset_name: String,
    pub asset_class: String,
    pub amount: f64,
    pub quantity: i32,
    pub price: f64,
    pub side: String,
    pub status: String,
    pub settlement_date: Option<NaiveDateTime>,
    pub settlement_status: Option<String>,
    pub exchange: Option<String>,
    pub settlement_location: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A synthesized trade awaiting insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrade {
    pub trade_id: String,
    pub trade_date: NaiveDateTime,
    pub customer_id: i32,
    pub customer_name: String,
    pub asset_name: String,
    pub asset_class: AssetClass,
    pub amount: f64,
    pub quantity: i32,
    pub price: f64,
    pub side: TradeSide,
    pub status: TradeStatus,
    pub settlement_date: NaiveDateTime,
    pub settlement_status: SettlementStatus,
    pub exchange: &'static str,
    pub settlement_location: &'static str,
}

// ---------------------------------------------------------------------------
// AssetClass
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    Equities,
    #[serde(rename = "Fixed Income")]
    FixedIncome,
    Commodities,
    #[serde(rename = "FX")]
    Fx,
    Funds,
}

impl AssetClass {
    pub const ALL: [AssetClass; 5] = [
        AssetClass::Equities,
        AssetClass::FixedIncome,
        AssetClass::Commodities,
        AssetClass::Fx,
        AssetClass::Funds,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Equities => "Equities",
            AssetClass::FixedIncome => "Fixed Income",
            AssetClass::Commodities => "Commodities",
            AssetClass::Fx => "FX",
            AssetClass::Funds => "Funds",
        }
    }

    /// Accepts the singular labels (`Equity`, `Commodity`, `Fund`) older
    /// dashboard builds send, and maps them to the stored plural form.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "equities" | "equity" => Some(AssetClass::Equities),
            "fixed income" | "fixed_income" | "fixedincome" => Some(AssetClass::FixedIncome),
            "commodities" | "commodity" => Some(AssetClass::Commodities),
            "fx" => Some(AssetClass::Fx),
            "funds" | "fund" => Some(AssetClass::Funds),
            _ => None,
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TradeSide
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "Buy",
            TradeSide::Sell => "Sell",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "buy" => Some(TradeSide::Buy),
            "sell" => Some(TradeSide::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TradeStatus / SettlementStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStatus {
    Completed,
    Pending,
    Failed,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Completed => "Completed",
            TradeStatus::Pending => "Pending",
            TradeStatus::Failed => "Failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "completed" => Some(TradeStatus::Completed),
            "pending" => Some(TradeStatus::Pending),
            "failed" => Some(TradeStatus::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementStatus {
    Settled,
    Pending,
    Failed,
}

impl SettlementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementStatus::Settled => "Settled",
            SettlementStatus::Pending => "Pending",
            SettlementStatus::Failed => "Failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "settled" => Some(SettlementStatus::Settled),
            "pending" => Some(SettlementStatus::Pending),
            "failed" => Some(SettlementStatus::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
