//! The Keel analytics engine
//!
//! Derives financial metrics from a snapshot of validated records: monthly
//! cash-flow summaries, budget utilization and alerts, saving-goal
//! projections, stress-test simulation, and activity streaks with badges.
//!
//! Every operation is a pure function of its explicit inputs - no I/O, no
//! ambient clock, no retained references - so independent evaluations can
//! run concurrently without synchronization. The web and storage layers own
//! all persistence; the only state that round-trips is the streak tracker's
//! [`StreakState`](types::StreakState), carried explicitly by the caller.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use keel_core::analytics::report;
//!
//! let report = report::monthly_report(&txns, &rules, &goals, month, today);
//! ```

pub mod budget;
pub mod cashflow;
pub mod goals;
pub mod report;
pub mod streaks;
pub mod stress;
pub mod types;

pub use budget::BudgetPolicy;
pub use report::{monthly_report, MonthlyReport};
pub use types::{
    Alert, Badge, BudgetEvaluation, BudgetResult, CashflowSummary, GoalProjection, KindTotals,
    Severity, StreakInfo, StreakState, StressResult,
};
