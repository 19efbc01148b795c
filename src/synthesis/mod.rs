//! Synthetic data generators.
//!
//! Everything here is pure: callers pass the reference date and the RNG,
//! so a seeded `StdRng` reproduces the same rows.

pub mod auc;
pub mod corporate_actions;
pub mod trade_counts;
pub mod trades;

use chrono::{Duration, Months, NaiveDate};
use rand::Rng;

/// Length of the historical lookback window.
pub const HISTORY_YEARS: u32 = 2;

/// First day of the historical window ending at `today`.
pub fn history_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(12 * HISTORY_YEARS))
        .unwrap_or(today - Duration::days(365 * HISTORY_YEARS as i64))
}

/// Pick from a weighted table. Weights need not sum to anything in
/// particular; the table must be non-empty.
pub(crate) fn weighted<T: Copy, R: Rng + ?Sized>(rng: &mut R, table: &[(T, u32)]) -> T {
    let total: u32 = table.iter().map(|(_, w)| *w).sum();
    let mut roll = rng.gen_range(0..total.max(1));
    for (item, weight) in table {
        if roll < *weight {
            return *item;
        }
        roll -= weight;
    }
    table[table.len() - 1].0
}

/// Uniform multiplicative noise in `[1 - spread, 1 + spread]`.
pub(crate) fn noise<R: Rng + ?Sized>(rng: &mut R, spread: f64) -> f64 {
    rng.gen_range((1.0 - spread)..=(1.0 + spread))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_history_start_two_years_back() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(history_start(today), NaiveDate::from_ymd_opt(2023, 3, 15).unwrap());
    }

    #[test]
    fn test_history_start_leap_day() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(history_start(today), NaiveDate::from_ymd_opt(2022, 2, 28).unwrap());
    }

    #[test]
    fn test_weighted_respects_zero_weight() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            assert_ne!(weighted(&mut rng, &[("a", 3), ("never", 0), ("b", 1)]), "never");
        }
    }

    #[test]
    fn test_weighted_skews_toward_heavy_entry() {
        let mut rng = StdRng::seed_from_u64(11);
        let heavy = (0..1_000)
            .filter(|_| weighted(&mut rng, &[(true, 9), (false, 1)]))
            .count();
        assert!(heavy > 800, "expected ~900 heavy picks, got {heavy}");
    }

    #[test]
    fn test_noise_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1_000 {
            let n = noise(&mut rng, 0.03);
            assert!((0.97..=1.03).contains(&n));
        }
    }
}
