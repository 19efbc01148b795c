//! Synthetic trade blotter.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use rand::seq::SliceRandom;
use rand::Rng;

use super::weighted;
use crate::models::{AssetClass, NewTrade, SettlementStatus, TradeSide, TradeStatus};

pub const TRADE_ID_BASE: usize = 100_000;
/// T+2 settlement.
pub const SETTLEMENT_OFFSET_DAYS: i64 = 2;
pub const LOOKBACK_DAYS: i64 = 365;

pub const EQUITY_ISSUERS: [&str; 8] = [
    "Apple Inc.",
    "Microsoft Corp.",
    "Alphabet Inc.",
    "Amazon.com Inc.",
    "NVIDIA Corp.",
    "JPMorgan Chase & Co.",
    "Johnson & Johnson",
    "Visa Inc.",
];

const ASSET_CLASS_WEIGHTS: [(AssetClass, u32); 5] = [
    (AssetClass::Equities, 40),
    (AssetClass::FixedIncome, 25),
    (AssetClass::Fx, 15),
    (AssetClass::Funds, 12),
    (AssetClass::Commodities, 8),
];

const SIDE_WEIGHTS: [(TradeSide, u32); 2] = [(TradeSide::Buy, 55), (TradeSide::Sell, 45)];

const STATUS_WEIGHTS: [(TradeStatus, u32); 3] = [
    (TradeStatus::Completed, 85),
    (TradeStatus::Pending, 10),
    (TradeStatus::Failed, 5),
];

/// Seeded customer a trade can be booked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRef {
    pub id: i32,
    pub name: String,
}

/// Per-class instrument universe and sizing.
struct Market {
    instruments: &'static [&'static str],
    price: (f64, f64),
    price_decimals: i32,
    quantity: (i32, i32),
    /// (exchange, settlement location) pairs
    venues: &'static [(&'static str, &'static str)],
}

fn market(asset_class: AssetClass) -> Market {
    match asset_class {
        AssetClass::Equities => Market {
            instruments: &EQUITY_ISSUERS,
            price: (20.0, 900.0),
            price_decimals: 2,
            quantity: (100, 10_000),
            venues: &[
                ("NYSE", "DTC"),
                ("NASDAQ", "DTC"),
                ("LSE", "CREST"),
                ("TSE", "JASDEC"),
                ("HKEX", "HKSCC"),
            ],
        },
        AssetClass::FixedIncome => Market {
            instruments: &[
                "US Treasury 10Y",
                "US Treasury 2Y",
                "German Bund 10Y",
                "UK Gilt 5Y",
                "Apple 3.85% 2043",
            ],
            price: (85.0, 110.0),
            price_decimals: 2,
            quantity: (1_000, 50_000),
            venues: &[("OTC", "Euroclear"), ("OTC", "Clearstream"), ("OTC", "Fedwire")],
        },
        AssetClass::Commodities => Market {
            instruments: &["Gold Futures", "Brent Crude Futures", "Copper Futures", "Silver Futures"],
            price: (20.0, 2_500.0),
            price_decimals: 2,
            quantity: (10, 1_000),
            venues: &[("CME", "CME Clearing"), ("ICE", "ICE Clear"), ("LME", "LME Clear")],
        },
        AssetClass::Fx => Market {
            instruments: &["EUR/USD", "USD/JPY", "GBP/USD", "USD/CHF", "AUD/USD"],
            price: (0.5, 160.0),
            price_decimals: 4,
            quantity: (10_000, 1_000_000),
            venues: &[("OTC", "CLS")],
        },
        AssetClass::Funds => Market {
            instruments: &[
                "Vanguard S&P 500 ETF",
                "iShares Core MSCI World",
                "SPDR Gold Shares",
                "PIMCO Total Return Fund",
            ],
            price: (50.0, 500.0),
            price_decimals: 2,
            quantity: (100, 5_000),
            venues: &[("NYSE", "DTC"), ("LSE", "CREST")],
        },
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

pub fn trade_id(index: usize) -> String {
    format!("T-{}", TRADE_ID_BASE + index)
}

/// Settlement status as observed at `now`.
pub fn settlement_status(
    status: TradeStatus,
    settlement_date: NaiveDateTime,
    now: NaiveDateTime,
) -> SettlementStatus {
    match status {
        TradeStatus::Failed => SettlementStatus::Failed,
        TradeStatus::Pending => SettlementStatus::Pending,
        TradeStatus::Completed if settlement_date <= now => SettlementStatus::Settled,
        TradeStatus::Completed => SettlementStatus::Pending,
    }
}

/// Random execution time on a day within the lookback window, during
/// market hours and never after `now`.
fn trade_timestamp<R: Rng + ?Sized>(now: NaiveDateTime, rng: &mut R) -> NaiveDateTime {
    let day = now.date() - Duration::days(rng.gen_range(0..LOOKBACK_DAYS));
    let time = NaiveTime::from_hms_opt(rng.gen_range(9..16), rng.gen_range(0..60), rng.gen_range(0..60))
        .unwrap_or(NaiveTime::MIN);
    day.and_time(time).min(now)
}

/// Generate trade number `index`. Returns `None` if `customers` is empty.
pub fn generate_trade<R: Rng + ?Sized>(
    index: usize,
    customers: &[CustomerRef],
    now: NaiveDateTime,
    rng: &mut R,
) -> Option<NewTrade> {
    let customer = customers.choose(rng)?;
    let asset_class = weighted(rng, &ASSET_CLASS_WEIGHTS);
    let market = market(asset_class);

    let asset_name = market.instruments.choose(rng).copied().unwrap_or("Unknown");
    let (exchange, settlement_location) = market
        .venues
        .choose(rng)
        .copied()
        .unwrap_or(("OTC", "Unknown"));

    let price = round_to(rng.gen_range(market.price.0..=market.price.1), market.price_decimals);
    let quantity = rng.gen_range(market.quantity.0..=market.quantity.1);
    let amount = round_to(price * quantity as f64, 2);

    let trade_date = trade_timestamp(now, rng);
    let settlement_date = trade_date + Duration::days(SETTLEMENT_OFFSET_DAYS);
    let status = weighted(rng, &STATUS_WEIGHTS);

    Some(NewTrade {
        trade_id: trade_id(index),
        trade_date,
        customer_id: customer.id,
        customer_name: customer.name.clone(),
        asset_name: asset_name.to_string(),
        asset_class,
        amount,
        quantity,
        price,
        side: weighted(rng, &SIDE_WEIGHTS),
        status,
        settlement_date,
        settlement_status: settlement_status(status, settlement_date, now),
        exchange,
        settlement_location,
    })
}

pub fn generate_trades<R: Rng + ?Sized>(
    count: usize,
    customers: &[CustomerRef],
    now: NaiveDateTime,
    rng: &mut R,
) -> Vec<NewTrade> {
    (0..count)
        .filter_map(|i| generate_trade(i, customers, now, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn customers() -> Vec<CustomerRef> {
        (1..=5)
            .map(|id| CustomerRef {
                id,
                name: format!("Customer {id}"),
            })
            .collect()
    }

    #[test]
    fn test_trade_ids_sequential() {
        assert_eq!(trade_id(0), "T-100000");
        assert_eq!(trade_id(999), "T-100999");
    }

    #[test]
    fn test_generates_requested_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let trades = generate_trades(1_000, &customers(), now(), &mut rng);
        assert_eq!(trades.len(), 1_000);
        assert_eq!(trades[0].trade_id, "T-100000");
        assert_eq!(trades[999].trade_id, "T-100999");
    }

    #[test]
    fn test_no_customers_no_trades() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_trades(10, &[], now(), &mut rng).is_empty());
    }

    #[test]
    fn test_derived_fields_consistent() {
        let mut rng = StdRng::seed_from_u64(2);
        let ids: Vec<i32> = customers().iter().map(|c| c.id).collect();

        for t in generate_trades(1_000, &customers(), now(), &mut rng) {
            assert!(ids.contains(&t.customer_id));
            assert_eq!(t.customer_name, format!("Customer {}", t.customer_id));
            assert_eq!(t.settlement_date - t.trade_date, Duration::days(2));
            assert!(t.trade_date <= now());
            assert!(t.trade_date >= now() - Duration::days(LOOKBACK_DAYS + 1));
            assert!((t.amount - t.price * t.quantity as f64).abs() <= 0.01);
            assert!(t.quantity > 0 && t.price > 0.0);
            assert_eq!(t.settlement_status, settlement_status(t.status, t.settlement_date, now()));
        }
    }

    #[test]
    fn test_status_skewed_toward_success() {
        let mut rng = StdRng::seed_from_u64(3);
        let trades = generate_trades(1_000, &customers(), now(), &mut rng);
        let completed = trades.iter().filter(|t| t.status == TradeStatus::Completed).count();
        let failed = trades.iter().filter(|t| t.status == TradeStatus::Failed).count();
        assert!(completed > 750, "completed = {completed}");
        assert!(failed < 100, "failed = {failed}");
    }

    #[test]
    fn test_settlement_status_rules() {
        let settle = now() + Duration::days(1);
        assert_eq!(
            settlement_status(TradeStatus::Completed, settle, now()),
            SettlementStatus::Pending
        );
        assert_eq!(
            settlement_status(TradeStatus::Completed, now(), now()),
            SettlementStatus::Settled
        );
        assert_eq!(
            settlement_status(TradeStatus::Failed, now(), now()),
            SettlementStatus::Failed
        );
        assert_eq!(
            settlement_status(TradeStatus::Pending, now() - Duration::days(5), now()),
            SettlementStatus::Pending
        );
    }

    #[test]
    fn test_same_seed_same_blotter() {
        let a = generate_trades(50, &customers(), now(), &mut StdRng::seed_from_u64(77));
        let b = generate_trades(50, &customers(), now(), &mut StdRng::seed_from_u64(77));
        assert_eq!(a, b);
    }
}
