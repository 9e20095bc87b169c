//! Stress-test simulation
//!
//! Projects monthly cash flow under a shock scenario and scores how well the
//! baseline holds up. The shock is applied once and held flat across the
//! horizon - no compounding drift.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{FinancialCondition, StressScenario};

use super::types::StressResult;

/// Scores at or above this are Stable
const STABLE_FLOOR: u8 = 70;
/// Scores at or above this (and below [`STABLE_FLOOR`]) are Vulnerable
const VULNERABLE_FLOOR: u8 = 40;

/// Project baseline monthly figures through a scenario.
///
/// Each projected month nets `income·(1 - shock) - expense·(1 + spike)`,
/// identical across the horizon. The resilience score is a fixed curve over
/// the projected net: non-negative nets land at 70 plus a headroom bonus;
/// deficits are scored by cumulative shortfall relative to one month of
/// baseline income.
pub fn run_scenario(
    baseline_income: Decimal,
    baseline_expense: Decimal,
    scenario: &StressScenario,
) -> StressResult {
    let shocked_income = baseline_income * (Decimal::ONE - scenario.income_shock_pct());
    let shocked_expense = baseline_expense * (Decimal::ONE + scenario.expense_spike_pct());
    let net = shocked_income - shocked_expense;

    let projected_cashflow = vec![net; scenario.months() as usize];
    let resilience_score = resilience_score(net, baseline_income, scenario.months());

    StressResult {
        projected_cashflow,
        resilience_score,
        condition: classify(resilience_score),
    }
}

/// Map a score onto the three conditions. Monotone with two fixed cuts.
pub fn classify(score: u8) -> FinancialCondition {
    if score >= STABLE_FLOOR {
        FinancialCondition::Stable
    } else if score >= VULNERABLE_FLOOR {
        FinancialCondition::Vulnerable
    } else {
        FinancialCondition::AtRisk
    }
}

fn resilience_score(net: Decimal, baseline_income: Decimal, months: u32) -> u8 {
    if net >= Decimal::ZERO {
        if baseline_income <= Decimal::ZERO {
            return STABLE_FLOOR;
        }
        let bonus = (net / baseline_income * Decimal::from(30)).round();
        let score = (Decimal::from(STABLE_FLOOR) + bonus).min(Decimal::ONE_HUNDRED);
        return score.to_u8().unwrap_or(100);
    }

    // Sustained deficit with no income to absorb it
    if baseline_income <= Decimal::ZERO {
        return 0;
    }

    let cumulative_deficit = -net * Decimal::from(months);
    let ratio = cumulative_deficit / baseline_income;

    if ratio <= Decimal::ONE {
        // Deficit within one month of income: the 40-69 band
        let score = Decimal::from(69) - (ratio * Decimal::from(29)).round();
        score.to_u8().unwrap_or(VULNERABLE_FLOOR)
    } else {
        let score = Decimal::from(39) - ((ratio - Decimal::ONE) * Decimal::from(10)).round();
        if score <= Decimal::ZERO {
            0
        } else {
            score.to_u8().unwrap_or(0)
        }
    }
}
