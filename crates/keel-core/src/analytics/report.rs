//! Monthly report assembly
//!
//! Composes the summarizer, budget evaluator, and goal projector into the
//! single result the budget page renders. Pure composition - every
//! classification rule lives in the component modules.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{BudgetRule, Month, SavingGoal, Transaction};

use super::types::{Alert, BudgetResult, CashflowSummary, GoalProjection};
use super::{budget, cashflow, goals};

/// Everything derived for one month's budget view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub month: Month,
    pub summary: CashflowSummary,
    /// Sorted by category name
    pub budgets: Vec<BudgetResult>,
    pub total_planned: Decimal,
    pub total_actual: Decimal,
    pub goals: Vec<GoalProjection>,
    /// Danger alerts first, insertion order within a severity
    pub alerts: Vec<Alert>,
}

/// Assemble the report for `month`, evaluating goals as of `as_of`.
pub fn monthly_report(
    transactions: &[Transaction],
    rules: &[BudgetRule],
    saving_goals: &[SavingGoal],
    month: Month,
    as_of: NaiveDate,
) -> MonthlyReport {
    let summary = cashflow::summarise_month(transactions, month);
    let breakdown = cashflow::expense_breakdown(transactions, month);

    let evaluation = budget::evaluate(rules, &breakdown);
    tracing::debug!(
        month = %month,
        results = evaluation.results.len(),
        alerts = evaluation.alerts.len(),
        "budget evaluation complete"
    );

    let mut alerts = evaluation.alerts;
    let mut projections = Vec::with_capacity(saving_goals.len());
    for goal in saving_goals {
        let projection = goals::project(goal, transactions, as_of);
        if let Some(alert) = goals::falling_behind(&projection) {
            alerts.push(alert);
        }
        projections.push(projection);
    }
    tracing::debug!(goals = projections.len(), "goal projections complete");

    // Stable sort: dangers surface first, original order within a severity
    alerts.sort_by(|a, b| b.severity.priority().cmp(&a.severity.priority()));

    MonthlyReport {
        month,
        summary,
        budgets: evaluation.results,
        total_planned: evaluation.total_planned,
        total_actual: evaluation.total_actual,
        goals: projections,
        alerts,
    }
}
