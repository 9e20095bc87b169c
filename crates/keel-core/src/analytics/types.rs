//! Derived result records for the analytics engine
//!
//! Everything here is a value type: equal field values mean interchangeable
//! results, and nothing holds a reference back into the inputs that produced
//! it. The web layer serializes these as-is.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{BadgeName, Category, FinancialCondition, Month};

/// Severity of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth attention but not urgent
    Warning,
    /// Requires action
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Warning => 1,
            Severity::Danger => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(Severity::Warning),
            "danger" => Ok(Severity::Danger),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// A presentation-ready alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

impl Alert {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Danger,
            message: message.into(),
        }
    }
}

/// Income/expense/net totals for one calendar month
///
/// Savings outflows are excluded from `expense`; callers that need them use
/// [`totals_by_kind`](super::cashflow::totals_by_kind).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashflowSummary {
    pub month: Month,
    pub income: Decimal,
    pub expense: Decimal,
    /// income - expense
    pub net: Decimal,
}

/// Lifetime totals per transaction kind (the dashboard figures)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub savings: Decimal,
}

impl KindTotals {
    /// income - expense - savings; equals the sum of signed amounts
    pub fn net_balance(&self) -> Decimal {
        self.income - self.expense - self.savings
    }
}

/// One row of the budget table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetResult {
    pub category: Category,
    pub planned: Decimal,
    pub actual: Decimal,
    /// planned - actual (negative when overspent)
    pub remaining: Decimal,
    /// actual / planned · 100; see the evaluator for the planned == 0 cases
    pub usage_percent: Decimal,
    /// usage_percent > 100
    pub overspent: bool,
}

/// Everything the budget evaluator derives for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetEvaluation {
    /// Sorted by category name for stable presentation
    pub results: Vec<BudgetResult>,
    pub alerts: Vec<Alert>,
    pub total_planned: Decimal,
    pub total_actual: Decimal,
}

/// Derived status of one saving goal at evaluation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProjection {
    pub name: String,
    pub total_amount: Decimal,
    /// Savings recorded within the goal's active window
    pub current_savings: Decimal,
    pub required_monthly: Decimal,
    /// current_savings / total_amount · 100
    pub progress: Decimal,
    /// Pace check: current monthly saving rate covers the required rate
    pub on_track: bool,
    /// required - current monthly rate; positive = behind
    pub saving_gap: Decimal,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
}

/// Outcome of projecting cash flow under a stress scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressResult {
    /// Projected net cash flow per month, one entry per horizon month
    pub projected_cashflow: Vec<Decimal>,
    /// 0-100, higher is more resilient
    pub resilience_score: u8,
    pub condition: FinancialCondition,
}

/// A badge earned by an activity streak
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub name: BadgeName,
    pub awarded_on: DateTime<Utc>,
}

/// Streak state the caller persists between evaluations
///
/// The tracker is stateless; this record is its explicit input, and
/// [`StreakInfo::state`] is the updated value to store back. Callers must
/// apply updates atomically per user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Consecutive calendar days with at least one transaction
    pub current: u32,
    /// Longest streak ever observed
    pub longest: u32,
    pub last_activity: Option<NaiveDate>,
}

/// Result of one streak evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInfo {
    pub current: u32,
    pub longest: u32,
    pub last_activity: Option<NaiveDate>,
    /// Badges first earned by this evaluation; empty on re-runs with
    /// unchanged activity
    pub new_badges: Vec<Badge>,
}

impl StreakInfo {
    /// The follow-on state for the caller to persist
    pub fn state(&self) -> StreakState {
        StreakState {
            current: self.current,
            longest: self.longest,
            last_activity: self.last_activity,
        }
    }
}
