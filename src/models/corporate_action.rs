use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Database row for the corporate_actions table.
///
/// `status` is a snapshot taken when the row was generated; it is not
/// re-evaluated as time passes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CorporateAction {
    pub id: i32,
    pub action_id: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub action_type: String,
    pub asset_name: String,
    pub mandatory: bool,
    pub announcement_date: NaiveDate,
    pub record_date: Option<NaiveDate>,
    pub payment_date: Option<NaiveDate>,
    pub status: String,
    pub priority: String,
    pub pending_election: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A synthesized corporate action awaiting insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCorporateAction {
    pub action_id: String,
    pub action_type: CorporateActionType,
    pub asset_name: String,
    pub mandatory: bool,
    pub announcement_date: NaiveDate,
    pub record_date: NaiveDate,
    pub payment_date: NaiveDate,
    pub status: CorporateActionStatus,
    pub priority: Priority,
    pub pending_election: bool,
}

// ---------------------------------------------------------------------------
// CorporateActionType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorporateActionType {
    Dividend,
    #[serde(rename = "Stock Split")]
    StockSplit,
    #[serde(rename = "Rights Issue")]
    RightsIssue,
    Merger,
    Redemption,
}

impl CorporateActionType {
    pub const ALL: [CorporateActionType; 5] = [
        CorporateActionType::Dividend,
        CorporateActionType::StockSplit,
        CorporateActionType::RightsIssue,
        CorporateActionType::Merger,
        CorporateActionType::Redemption,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CorporateActionType::Dividend => "Dividend",
            CorporateActionType::StockSplit => "Stock Split",
            CorporateActionType::RightsIssue => "Rights Issue",
            CorporateActionType::Merger => "Merger",
            CorporateActionType::Redemption => "Redemption",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dividend" => Some(CorporateActionType::Dividend),
            "stock split" | "stock_split" => Some(CorporateActionType::StockSplit),
            "rights issue" | "rights_issue" => Some(CorporateActionType::RightsIssue),
            "merger" => Some(CorporateActionType::Merger),
            "redemption" => Some(CorporateActionType::Redemption),
            _ => None,
        }
    }
}

impl fmt::Display for CorporateActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CorporateActionStatus
// ---------------------------------------------------------------------------

/// Lifecycle: Announced → Pending → Processing → Completed, with Canceled
/// reachable from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorporateActionStatus {
    Announced,
    Pending,
    Processing,
    Completed,
    Canceled,
}

impl CorporateActionStatus {
    pub const ALL: [CorporateActionStatus; 5] = [
        CorporateActionStatus::Completed,
        CorporateActionStatus::Pending,
        CorporateActionStatus::Announced,
        CorporateActionStatus::Processing,
        CorporateActionStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CorporateActionStatus::Announced => "Announced",
            CorporateActionStatus::Pending => "Pending",
            CorporateActionStatus::Processing => "Processing",
            CorporateActionStatus::Completed => "Completed",
            CorporateActionStatus::Canceled => "Canceled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "announced" => Some(CorporateActionStatus::Announced),
            "pending" => Some(CorporateActionStatus::Pending),
            "processing" => Some(CorporateActionStatus::Processing),
            "completed" => Some(CorporateActionStatus::Completed),
            "canceled" | "cancelled" => Some(CorporateActionStatus::Canceled),
            _ => None,
        }
    }

    /// An event still needs operational attention.
    pub fn is_open(&self) -> bool {
        !matches!(
            self,
            CorporateActionStatus::Completed | CorporateActionStatus::Canceled
        )
    }
}

impl fmt::Display for CorporateActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Normal,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Normal, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "normal" => Some(Priority::Normal),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
