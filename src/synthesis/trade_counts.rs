//! Daily trade counts per asset class with month, weekday and
//! year-over-year seasonality.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::Rng;

use crate::models::{AssetClass, TradeCountPoint};

pub const BASE_DAILY_COUNT: f64 = 15.0;

/// January..December.
const MONTH_FACTORS: [f64; 12] = [0.8, 0.9, 1.0, 1.1, 1.2, 1.1, 0.7, 0.6, 0.9, 1.0, 0.95, 0.85];
const SECOND_YEAR_GROWTH: f64 = 1.1;
const DAYS_IN_FIRST_YEAR: u32 = 364;
const RANDOM_MIN: f64 = 0.7;
const RANDOM_MAX: f64 = 1.3;

pub fn month_factor(date: NaiveDate) -> f64 {
    MONTH_FACTORS[date.month0() as usize]
}

/// Markets are effectively shut at weekends; activity peaks mid-week.
pub fn weekday_factor(weekday: Weekday) -> f64 {
    match weekday {
        Weekday::Mon => 0.9,
        Weekday::Tue => 1.1,
        Weekday::Wed => 1.25,
        Weekday::Thu => 1.1,
        Weekday::Fri => 0.85,
        Weekday::Sat => 0.05,
        Weekday::Sun => 0.02,
    }
}

pub fn growth_factor(day_index: u32) -> f64 {
    if day_index < DAYS_IN_FIRST_YEAR {
        1.0
    } else {
        SECOND_YEAR_GROWTH
    }
}

pub fn asset_multiplier(asset_class: AssetClass) -> f64 {
    match asset_class {
        AssetClass::Equities => 4.0,
        AssetClass::FixedIncome => 2.5,
        AssetClass::Fx => 1.8,
        AssetClass::Funds => 1.2,
        AssetClass::Commodities => 0.9,
    }
}

/// Count before the random factor is applied.
pub fn expected_count(date: NaiveDate, day_index: u32, asset_class: AssetClass) -> f64 {
    BASE_DAILY_COUNT
        * month_factor(date)
        * weekday_factor(date.weekday())
        * growth_factor(day_index)
        * asset_multiplier(asset_class)
}

/// One row per (day, asset class) for `days` consecutive days from `start`.
pub fn generate_daily_counts<R: Rng + ?Sized>(
    start: NaiveDate,
    days: u32,
    rng: &mut R,
) -> Vec<TradeCountPoint> {
    let mut counts = Vec::with_capacity(days as usize * AssetClass::ALL.len());

    for day_index in 0..days {
        let date = start + Duration::days(day_index as i64);
        for asset_class in AssetClass::ALL {
            let random = rng.gen_range(RANDOM_MIN..=RANDOM_MAX);
            let count = (expected_count(date, day_index, asset_class) * random).round();
            counts.push(TradeCountPoint {
                date,
                asset_class,
                trade_count: count.max(0.0) as i32,
            });
        }
    }

    counts
}
