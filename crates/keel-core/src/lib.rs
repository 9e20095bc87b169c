//! Keel Core Library
//!
//! The analytics engine for the Keel personal finance tool:
//! - Validated domain records (transactions, budget rules, goals, scenarios)
//! - Monthly cash-flow summarization
//! - Budget evaluation with utilization alerts
//! - Saving-goal projection and pace tracking
//! - Multi-month stress-test simulation with resilience scoring
//! - Activity-streak and badge tracking
//!
//! The crate is a pure computation layer: it consumes plain records from the
//! web/storage layers and returns plain results, with no knowledge of
//! requests, templates, or storage.

pub mod analytics;
pub mod error;
pub mod models;

pub use analytics::{
    Alert, Badge, BudgetEvaluation, BudgetPolicy, BudgetResult, CashflowSummary, GoalProjection,
    KindTotals, MonthlyReport, Severity, StreakInfo, StreakState, StressResult,
};
pub use error::{Result, ValidationError};
pub use models::{
    validate_batch, BadgeName, BudgetRule, Category, FinancialCondition, IncomeCategory, Month,
    NewTransaction, SavingGoal, StressScenario, Transaction, TransactionKind,
};
