//! Error types for Keel

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::TransactionKind;

/// Validation failures raised when constructing domain records.
///
/// Validation runs once, at construction; a record that exists has passed
/// every check. Rejecting a record is fatal to that record only - batch
/// helpers keep processing the rest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("transaction date {0} is in the future")]
    FutureDate(NaiveDate),

    #[error("income_category is required for Income transactions")]
    MissingIncomeCategory,

    #[error("income_category must be empty for {0} transactions")]
    UnexpectedIncomeCategory(TransactionKind),

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("scenario parameter {parameter} out of range: {value}")]
    OutOfRangeScenarioParameter {
        parameter: &'static str,
        value: String,
    },

    #[error("unknown category value: {0}")]
    UnknownCategory(String),

    #[error("invalid month key: {0}")]
    InvalidMonthKey(String),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
