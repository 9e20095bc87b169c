//! Saving goal projection
//!
//! Required-contribution math, progress, and the two lagging signals: pace
//! (`on_track`, against the required monthly rate) and cumulative progress
//! (the falling-behind warning). Degenerate goals - zero targets, inverted
//! horizons, brand-new goals - produce defined zero results, never errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Month, SavingGoal, Transaction, TransactionKind};

use super::types::{Alert, GoalProjection};

/// Progress percentage below which a goal is flagged as falling behind
const FALLING_BEHIND_PROGRESS: u32 = 70;

/// Required monthly contribution to reach the target on time.
///
/// Zero when the horizon is empty or inverted - a degenerate goal, not an
/// error; callers may flag it.
pub fn required_monthly(goal: &SavingGoal) -> Decimal {
    let months = Month::of(goal.start_date).months_until(Month::of(goal.target_date));
    if months <= 0 {
        return Decimal::ZERO;
    }
    (goal.total_amount - goal.past_savings) / Decimal::from(months)
}

/// Cumulative progress toward the target, as a percentage.
pub fn progress(goal: &SavingGoal, current_savings: Decimal) -> Decimal {
    if goal.total_amount.is_zero() {
        return Decimal::ZERO;
    }
    current_savings / goal.total_amount * Decimal::ONE_HUNDRED
}

/// Whether the current monthly saving rate covers the required rate.
pub fn on_track(goal: &SavingGoal, current_monthly_saving: Decimal) -> bool {
    current_monthly_saving >= required_monthly(goal)
}

/// Required minus current monthly rate. Positive = behind, zero or negative
/// = on pace or ahead.
pub fn saving_gap(goal: &SavingGoal, current_monthly_saving: Decimal) -> Decimal {
    required_monthly(goal) - current_monthly_saving
}

/// Total of Savings-kind transactions dated within the goal's active window.
pub fn saved_toward(goal: &SavingGoal, transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| {
            t.kind() == TransactionKind::Savings
                && t.txn_date() >= goal.start_date
                && t.txn_date() <= goal.target_date
        })
        .map(Transaction::amount)
        .sum()
}

/// Normalize cumulative savings to a monthly rate as of `as_of`.
///
/// In the goal's first active calendar month the raw sum stands in for the
/// rate, since less than one full month has elapsed.
pub fn monthly_saving_rate(goal: &SavingGoal, current_savings: Decimal, as_of: NaiveDate) -> Decimal {
    let start = Month::of(goal.start_date);
    let now = Month::of(as_of);
    if start == now {
        return current_savings;
    }
    let months_active = start.months_until(now).max(1);
    current_savings / Decimal::from(months_active)
}

/// Full projection for one goal as of `as_of`.
pub fn project(goal: &SavingGoal, transactions: &[Transaction], as_of: NaiveDate) -> GoalProjection {
    let current_savings = saved_toward(goal, transactions);
    let rate = monthly_saving_rate(goal, current_savings, as_of);

    GoalProjection {
        name: goal.name.clone(),
        total_amount: goal.total_amount,
        current_savings,
        required_monthly: required_monthly(goal),
        progress: progress(goal, current_savings),
        on_track: on_track(goal, rate),
        saving_gap: saving_gap(goal, rate),
        start_date: goal.start_date,
        target_date: goal.target_date,
    }
}

/// Warning when cumulative progress has fallen under the threshold.
///
/// Independent of `on_track`: a goal can be on pace this month and still be
/// behind overall, or vice versa.
pub fn falling_behind(projection: &GoalProjection) -> Option<Alert> {
    if projection.progress < Decimal::from(FALLING_BEHIND_PROGRESS) {
        Some(Alert::warning(format!(
            "You're falling behind on your saving goal: {}",
            projection.name
        )))
    } else {
        None
    }
}
