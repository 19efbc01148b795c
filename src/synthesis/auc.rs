//! Assets-under-custody series: weekly anchors with trend, quarterly
//! seasonality and noise, then daily points interpolated between them.

use chrono::{Duration, NaiveDate};
use rand::Rng;

use super::noise;
use crate::models::AucPoint;

pub const TOTAL_WEEKS: u32 = 104;
pub const DAYS_PER_WEEK: u32 = 7;
/// Interpolated rows between two consecutive weekly anchors.
pub const DAYS_BETWEEN_ANCHORS: u32 = DAYS_PER_WEEK - 1;

/// Starting AUM, in currency units.
pub const BASE_AUC_VALUE: f64 = 3_500_000_000_000.0;

/// Q1..Q4 business-cycle multipliers, each spanning 13 weeks.
const QUARTERLY_FACTORS: [f64; 4] = [1.02, 1.04, 0.99, 1.03];
const WEEKS_PER_QUARTER: u32 = 13;
const WEEKS_PER_YEAR: u32 = 52;
const WEEKLY_GROWTH: f64 = 0.0015;
const WEEKLY_NOISE: f64 = 0.01;
const MARKET_EVENT_INTERVAL: u32 = 26;
const MARKET_EVENT_NOISE: f64 = 0.05;
const ALLOCATION_NOISE: f64 = 0.03;
const DAILY_NOISE: f64 = 0.005;

/// Target allocation fractions at a point in the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation {
    pub equities: f64,
    pub fixed_income: f64,
    pub alternatives: f64,
}

impl Allocation {
    /// Equities and alternatives drift up, fixed income drifts down.
    /// `progress` runs from 0.0 at the window start to 1.0 at its end.
    pub fn at(progress: f64) -> Self {
        Self {
            equities: 0.40 + progress * 0.08,
            fixed_income: 0.40 - progress * 0.06,
            alternatives: 0.10 + progress * 0.06,
        }
    }

    pub fn cash(&self) -> f64 {
        1.0 - self.equities - self.fixed_income - self.alternatives
    }
}

pub fn quarterly_factor(week: u32) -> f64 {
    let quarter = ((week % WEEKS_PER_YEAR) / WEEKS_PER_QUARTER) as usize;
    QUARTERLY_FACTORS[quarter.min(QUARTERLY_FACTORS.len() - 1)]
}

pub fn week_factor(week: u32) -> f64 {
    1.0 + week as f64 * WEEKLY_GROWTH
}

/// Build a point whose cash bucket is the remainder of `total`. If the
/// three noisy buckets overshoot the total they are scaled back so cash
/// lands on zero instead of going negative.
pub fn with_cash_remainder(
    date: NaiveDate,
    total: f64,
    equities: f64,
    fixed_income: f64,
    alternatives: f64,
) -> AucPoint {
    let (mut equities, mut fixed_income, mut alternatives) = (equities, fixed_income, alternatives);
    let allocated = equities + fixed_income + alternatives;
    if allocated > total && allocated > 0.0 {
        let scale = total / allocated;
        equities *= scale;
        fixed_income *= scale;
        alternatives *= scale;
    }

    AucPoint {
        date,
        total,
        equities,
        fixed_income,
        alternatives,
        cash: (total - (equities + fixed_income + alternatives)).max(0.0),
    }
}

/// The anchor for week index `week`, dated `start + 7 * week` days.
pub fn weekly_point<R: Rng + ?Sized>(start: NaiveDate, week: u32, rng: &mut R) -> AucPoint {
    let date = start + Duration::days((week * DAYS_PER_WEEK) as i64);

    let weekly_random = noise(rng, WEEKLY_NOISE);
    let market_event = if week % MARKET_EVENT_INTERVAL == 0 {
        noise(rng, MARKET_EVENT_NOISE)
    } else {
        1.0
    };

    let total =
        BASE_AUC_VALUE * week_factor(week) * quarterly_factor(week) * weekly_random * market_event;

    let allocation = Allocation::at(week as f64 / TOTAL_WEEKS as f64);
    let equities = total * allocation.equities * noise(rng, ALLOCATION_NOISE);
    let fixed_income = total * allocation.fixed_income * noise(rng, ALLOCATION_NOISE);
    let alternatives = total * allocation.alternatives * noise(rng, ALLOCATION_NOISE);

    with_cash_remainder(date, total, equities, fixed_income, alternatives)
}

/// Weekly anchors for weeks `0..=TOTAL_WEEKS`. The final anchor closes
/// the last interpolation span; only the first `TOTAL_WEEKS` are stored
/// as weekly rows.
pub fn generate_weekly<R: Rng + ?Sized>(start: NaiveDate, rng: &mut R) -> Vec<AucPoint> {
    (0..=TOTAL_WEEKS)
        .map(|week| weekly_point(start, week, rng))
        .collect()
}

/// Linear interpolation between `from` and `to` at `fraction`, with
/// independent noise on each bucket. Cash is re-derived as the remainder.
pub fn interpolate_point<R: Rng + ?Sized>(
    from: &AucPoint,
    to: &AucPoint,
    date: NaiveDate,
    fraction: f64,
    rng: &mut R,
) -> AucPoint {
    let lerp = |a: f64, b: f64| a + (b - a) * fraction;

    with_cash_remainder(
        date,
        lerp(from.total, to.total) * noise(rng, DAILY_NOISE),
        lerp(from.equities, to.equities) * noise(rng, DAILY_NOISE),
        lerp(from.fixed_income, to.fixed_income) * noise(rng, DAILY_NOISE),
        lerp(from.alternatives, to.alternatives) * noise(rng, DAILY_NOISE),
    )
}

/// Daily points strictly between each pair of consecutive anchors.
/// Pairs that are not exactly one week apart are skipped.
pub fn interpolate_daily<R: Rng + ?Sized>(anchors: &[AucPoint], rng: &mut R) -> Vec<AucPoint> {
    let mut daily = Vec::with_capacity(anchors.len() * DAYS_BETWEEN_ANCHORS as usize);

    for pair in anchors.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        if (to.date - from.date).num_days() != DAYS_PER_WEEK as i64 {
            tracing::debug!(from = %from.date, to = %to.date, "Skipping non-weekly anchor pair");
            continue;
        }

        for day in 1..=DAYS_BETWEEN_ANCHORS {
            let fraction = day as f64 / DAYS_PER_WEEK as f64;
            let date = from.date + Duration::days(day as i64);
            daily.push(interpolate_point(from, to, date, fraction, rng));
        }
    }

    daily
}
