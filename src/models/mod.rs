pub mod corporate_action;
pub mod customer;
pub mod history;
pub mod notification;
pub mod trade;

pub use corporate_action::{
    CorporateAction, CorporateActionStatus, CorporateActionType, NewCorporateAction, Priority,
};
pub use customer::{Account, AccountType, Customer, CustomerStatus};
pub use history::{AucPoint, AucSnapshot, TradeCountPoint, TradesByAsset};
pub use notification::{NewNotification, Notification, NotificationKind};
pub use trade::{AssetClass, NewTrade, SettlementStatus, Trade, TradeSide, TradeStatus};
