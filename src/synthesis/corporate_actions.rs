//! Synthetic corporate-action calendar.

use std::ops::RangeInclusive;

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

use super::trades::EQUITY_ISSUERS;
use super::weighted;
use crate::models::{CorporateActionStatus, CorporateActionType, NewCorporateAction, Priority};

pub const ACTION_ID_BASE: usize = 200_000;
pub const ANNOUNCEMENT_LOOKBACK_DAYS: i64 = 180;
/// Days before the record date during which an action counts as Pending.
pub const PENDING_WINDOW_DAYS: i64 = 7;
/// Voluntary actions whose record date is this close are escalated.
pub const URGENT_ELECTION_DAYS: i64 = 14;
pub const CANCEL_PROBABILITY: f64 = 0.03;
pub const VOLUNTARY_MERGER_PROBABILITY: f64 = 0.3;

const TYPE_WEIGHTS: [(CorporateActionType, u32); 5] = [
    (CorporateActionType::Dividend, 45),
    (CorporateActionType::Redemption, 20),
    (CorporateActionType::RightsIssue, 15),
    (CorporateActionType::StockSplit, 10),
    (CorporateActionType::Merger, 10),
];

pub fn action_id(index: usize) -> String {
    format!("CA-{}", ACTION_ID_BASE + index)
}

/// Days from announcement to record date, and from record to payment date.
pub fn date_offsets(action_type: CorporateActionType) -> (RangeInclusive<i64>, RangeInclusive<i64>) {
    match action_type {
        CorporateActionType::Dividend => (14..=21, 7..=14),
        CorporateActionType::StockSplit => (20..=30, 5..=10),
        CorporateActionType::RightsIssue => (10..=15, 15..=25),
        CorporateActionType::Merger => (30..=60, 30..=45),
        CorporateActionType::Redemption => (15..=30, 1..=5),
    }
}

/// Lifecycle status as of `today`. A canceled action stays canceled
/// regardless of its dates.
pub fn derive_status(
    today: NaiveDate,
    record_date: NaiveDate,
    payment_date: NaiveDate,
    canceled: bool,
) -> CorporateActionStatus {
    if canceled {
        CorporateActionStatus::Canceled
    } else if today < record_date - Duration::days(PENDING_WINDOW_DAYS) {
        CorporateActionStatus::Announced
    } else if today < record_date {
        CorporateActionStatus::Pending
    } else if today < payment_date {
        CorporateActionStatus::Processing
    } else {
        CorporateActionStatus::Completed
    }
}

pub fn derive_priority(
    action_type: CorporateActionType,
    mandatory: bool,
    today: NaiveDate,
    record_date: NaiveDate,
) -> Priority {
    let days_to_record = (record_date - today).num_days();
    match action_type {
        CorporateActionType::Merger => Priority::High,
        _ if !mandatory && (0..=URGENT_ELECTION_DAYS).contains(&days_to_record) => Priority::High,
        CorporateActionType::StockSplit => Priority::Low,
        _ => Priority::Normal,
    }
}

fn is_mandatory<R: Rng + ?Sized>(action_type: CorporateActionType, rng: &mut R) -> bool {
    match action_type {
        CorporateActionType::RightsIssue => false,
        CorporateActionType::Merger => !rng.gen_bool(VOLUNTARY_MERGER_PROBABILITY),
        _ => true,
    }
}

/// Generate action number `index` with its status frozen as of `today`.
pub fn generate_corporate_action<R: Rng + ?Sized>(
    index: usize,
    today: NaiveDate,
    rng: &mut R,
) -> NewCorporateAction {
    let action_type = weighted(rng, &TYPE_WEIGHTS);
    let issuer = EQUITY_ISSUERS.choose(rng).copied().unwrap_or("Unknown");

    let (record_offset, payment_offset) = date_offsets(action_type);
    let announcement_date = today - Duration::days(rng.gen_range(0..ANNOUNCEMENT_LOOKBACK_DAYS));
    let record_date = announcement_date + Duration::days(rng.gen_range(record_offset));
    let payment_date = record_date + Duration::days(rng.gen_range(payment_offset));

    let mandatory = is_mandatory(action_type, rng);
    let canceled = rng.gen_bool(CANCEL_PROBABILITY);
    let status = derive_status(today, record_date, payment_date, canceled);

    let pending_election = !mandatory
        && matches!(
            status,
            CorporateActionStatus::Announced | CorporateActionStatus::Pending
        );

    NewCorporateAction {
        action_id: action_id(index),
        action_type,
        asset_name: format!("{issuer} Equity"),
        mandatory,
        announcement_date,
        record_date,
        payment_date,
        status,
        priority: derive_priority(action_type, mandatory, today, record_date),
        pending_election,
    }
}

pub fn generate_corporate_actions<R: Rng + ?Sized>(
    count: usize,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<NewCorporateAction> {
    (0..count)
        .map(|i| generate_corporate_action(i, today, rng))
        .collect()
}
