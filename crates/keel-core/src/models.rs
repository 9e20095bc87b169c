//! Domain models for Keel
//!
//! Input records are validated once, at construction, against the invariants
//! of the analytics engine; everything downstream consumes them read-only.
//! The unvalidated shapes the web/form layer produces (`NewTransaction`) are
//! separate types, so a `Transaction` in hand is always a valid one.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ValidationError};

/// Spending categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Essential Spending")]
    EssentialSpending,
    #[serde(rename = "Shopping & Entertainment")]
    ShoppingEntertainment,
    Education,
    Health,
    Insurance,
    Investment,
    /// Catch-all for spend that fits nowhere else. Excluded from implicit
    /// budget entries.
    Other,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 7] = [
        Category::EssentialSpending,
        Category::ShoppingEntertainment,
        Category::Education,
        Category::Health,
        Category::Insurance,
        Category::Investment,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EssentialSpending => "Essential Spending",
            Self::ShoppingEntertainment => "Shopping & Entertainment",
            Self::Education => "Education",
            Self::Health => "Health",
            Self::Insurance => "Insurance",
            Self::Investment => "Investment",
            Self::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Essential Spending" => Ok(Self::EssentialSpending),
            "Shopping & Entertainment" => Ok(Self::ShoppingEntertainment),
            "Education" => Ok(Self::Education),
            "Health" => Ok(Self::Health),
            "Insurance" => Ok(Self::Insurance),
            "Investment" => Ok(Self::Investment),
            "Other" => Ok(Self::Other),
            _ => Err(ValidationError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Income source classification, required on Income transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeCategory {
    #[serde(rename = "Full-time Income")]
    FullTime,
    #[serde(rename = "Part-time Income")]
    PartTime,
    #[serde(rename = "Freelance Income")]
    Freelance,
    Bonus,
}

impl IncomeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "Full-time Income",
            Self::PartTime => "Part-time Income",
            Self::Freelance => "Freelance Income",
            Self::Bonus => "Bonus",
        }
    }
}

impl FromStr for IncomeCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Full-time Income" => Ok(Self::FullTime),
            "Part-time Income" => Ok(Self::PartTime),
            "Freelance Income" => Ok(Self::Freelance),
            "Bonus" => Ok(Self::Bonus),
            _ => Err(ValidationError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
    /// Money moved into savings. An outflow from disposable cash, but
    /// tracked separately from Expense in monthly summaries.
    Savings,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Savings => "Savings",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Income" => Ok(Self::Income),
            "Expense" => Ok(Self::Expense),
            "Savings" => Ok(Self::Savings),
            _ => Err(ValidationError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Projected solvency classification under a stress scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinancialCondition {
    Stable,
    Vulnerable,
    #[serde(rename = "At-Risk")]
    AtRisk,
}

impl FinancialCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "Stable",
            Self::Vulnerable => "Vulnerable",
            Self::AtRisk => "At-Risk",
        }
    }
}

impl fmt::Display for FinancialCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Activity-streak badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BadgeName {
    #[serde(rename = "7-day streak")]
    Streak7,
    #[serde(rename = "30-day streak")]
    Streak30,
    #[serde(rename = "60-day streak")]
    Streak60,
}

impl BadgeName {
    /// Every badge, lowest threshold first
    pub const ALL: [BadgeName; 3] = [BadgeName::Streak7, BadgeName::Streak30, BadgeName::Streak60];

    /// Consecutive-day count at which this badge is earned
    pub fn threshold(&self) -> u32 {
        match self {
            Self::Streak7 => 7,
            Self::Streak30 => 30,
            Self::Streak60 => 60,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Streak7 => "7-day streak",
            Self::Streak30 => "30-day streak",
            Self::Streak60 => "60-day streak",
        }
    }
}

impl fmt::Display for BadgeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A calendar month key ("YYYY-MM")
///
/// The web layer passes months around as strings; inside the engine they are
/// this value type, which orders chronologically and serializes back to the
/// same string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonthKey(format!(
                "{year:04}-{month:02}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The month a date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whether `date` falls within this calendar month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Whole calendar months from `self` to `other`: Δyear·12 + Δmonth.
    /// Negative when `other` precedes `self`.
    pub fn months_until(&self, other: Month) -> i32 {
        (other.year - self.year) * 12 + (other.month as i32 - self.month as i32)
    }
}

impl FromStr for Month {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || ValidationError::InvalidMonthKey(s.to_string());
        let (y, m) = s.split_once('-').ok_or_else(bad)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(bad());
        }
        let year: i32 = y.parse().map_err(|_| bad())?;
        let month: u32 = m.parse().map_err(|_| bad())?;
        Month::new(year, month).map_err(|_| bad())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Month {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A transaction as the web/form layer hands it in, before validation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTransaction {
    /// Always positive; the kind determines the sign
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: Category,
    pub txn_date: NaiveDate,
    /// Required for Income, forbidden otherwise
    pub income_category: Option<IncomeCategory>,
}

/// A validated, immutable transaction
///
/// Fields are private: the only way to obtain one is [`Transaction::new`],
/// so every instance satisfies the invariants (positive amount, date not in
/// the future, income_category present iff kind is Income).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    id: Uuid,
    amount: Decimal,
    kind: TransactionKind,
    category: Category,
    txn_date: NaiveDate,
    income_category: Option<IncomeCategory>,
}

impl Transaction {
    /// Validate `input` against `as_of` (the externally supplied current
    /// date) and assign an id.
    pub fn new(input: NewTransaction, as_of: NaiveDate) -> Result<Self> {
        if input.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(input.amount));
        }
        if input.txn_date > as_of {
            return Err(ValidationError::FutureDate(input.txn_date));
        }
        match (input.kind, input.income_category) {
            (TransactionKind::Income, None) => return Err(ValidationError::MissingIncomeCategory),
            (kind, Some(_)) if kind != TransactionKind::Income => {
                return Err(ValidationError::UnexpectedIncomeCategory(kind))
            }
            _ => {}
        }

        Ok(Self {
            id: Uuid::new_v4(),
            amount: input.amount,
            kind: input.kind,
            category: input.category,
            txn_date: input.txn_date,
            income_category: input.income_category,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn txn_date(&self) -> NaiveDate {
        self.txn_date
    }

    pub fn income_category(&self) -> Option<IncomeCategory> {
        self.income_category
    }

    /// Amount with sign applied per kind: positive for Income, negative for
    /// Expense and Savings (both are outflows from disposable cash).
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense | TransactionKind::Savings => -self.amount,
        }
    }
}

/// Validate a batch of inputs. Rejection is per record: the offending input
/// is dropped and the rest still process.
pub fn validate_batch(
    inputs: Vec<NewTransaction>,
    as_of: NaiveDate,
) -> (Vec<Transaction>, Vec<ValidationError>) {
    let mut accepted = Vec::with_capacity(inputs.len());
    let mut rejected = Vec::new();

    for input in inputs {
        match Transaction::new(input, as_of) {
            Ok(txn) => accepted.push(txn),
            Err(e) => rejected.push(e),
        }
    }

    if !rejected.is_empty() {
        tracing::debug!(
            accepted = accepted.len(),
            rejected = rejected.len(),
            "batch validation rejected records"
        );
    }

    (accepted, rejected)
}

/// A planned monthly spending limit for one category
///
/// The store resolves one rule per (category, month); the engine receives
/// the resolved set for the month under evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetRule {
    category: Category,
    monthly_limit: Decimal,
}

impl BudgetRule {
    pub fn new(category: Category, monthly_limit: Decimal) -> Result<Self> {
        if monthly_limit <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(monthly_limit));
        }
        Ok(Self {
            category,
            monthly_limit,
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn monthly_limit(&self) -> Decimal {
        self.monthly_limit
    }
}

/// Read-only snapshot of a saving goal at evaluation time
///
/// The goal itself lives in the store and may be edited between evaluations;
/// the engine only ever sees this snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingGoal {
    pub name: String,
    pub total_amount: Decimal,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    /// Amount already saved before tracking began
    pub past_savings: Decimal,
}

/// A shock scenario for stress testing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StressScenario {
    name: String,
    income_shock_pct: Decimal,
    expense_spike_pct: Decimal,
    months: u32,
}

impl StressScenario {
    /// Shock fractions must fall in [0, 1]; the horizon in [1, 12] months.
    pub fn new(
        name: impl Into<String>,
        income_shock_pct: Decimal,
        expense_spike_pct: Decimal,
        months: u32,
    ) -> Result<Self> {
        let unit = Decimal::ZERO..=Decimal::ONE;
        if !unit.contains(&income_shock_pct) {
            return Err(ValidationError::OutOfRangeScenarioParameter {
                parameter: "income_shock_pct",
                value: income_shock_pct.to_string(),
            });
        }
        if !unit.contains(&expense_spike_pct) {
            return Err(ValidationError::OutOfRangeScenarioParameter {
                parameter: "expense_spike_pct",
                value: expense_spike_pct.to_string(),
            });
        }
        if !(1..=12).contains(&months) {
            return Err(ValidationError::OutOfRangeScenarioParameter {
                parameter: "months",
                value: months.to_string(),
            });
        }
        Ok(Self {
            name: name.into(),
            income_shock_pct,
            expense_spike_pct,
            months,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn income_shock_pct(&self) -> Decimal {
        self.income_shock_pct
    }

    pub fn expense_spike_pct(&self) -> Decimal {
        self.expense_spike_pct
    }

    pub fn months(&self) -> u32 {
        self.months
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(amount: Decimal, date: NaiveDate) -> NewTransaction {
        NewTransaction {
            amount,
            kind: TransactionKind::Expense,
            category: Category::EssentialSpending,
            txn_date: date,
            income_category: None,
        }
    }

    #[test]
    fn test_category_round_trip() {
        for cat in Category::ALL {
            assert_eq!(cat.as_str().parse::<Category>().unwrap(), cat);
        }
        assert!(matches!(
            "Groceries".parse::<Category>(),
            Err(ValidationError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_signed_amount_follows_kind() {
        let today = day(2024, 6, 15);
        let txn = Transaction::new(expense(dec!(25), today), today).unwrap();
        assert_eq!(txn.signed_amount(), dec!(-25));

        let income = Transaction::new(
            NewTransaction {
                amount: dec!(3000),
                kind: TransactionKind::Income,
                category: Category::Other,
                txn_date: today,
                income_category: Some(IncomeCategory::FullTime),
            },
            today,
        )
        .unwrap();
        assert_eq!(income.signed_amount(), dec!(3000));

        let savings = Transaction::new(
            NewTransaction {
                amount: dec!(500),
                kind: TransactionKind::Savings,
                category: Category::Other,
                txn_date: today,
                income_category: None,
            },
            today,
        )
        .unwrap();
        assert_eq!(savings.signed_amount(), dec!(-500));
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let today = day(2024, 6, 15);
        assert_eq!(
            Transaction::new(expense(Decimal::ZERO, today), today),
            Err(ValidationError::NonPositiveAmount(Decimal::ZERO))
        );
        assert!(Transaction::new(expense(dec!(-5), today), today).is_err());
    }

    #[test]
    fn test_rejects_future_date() {
        let today = day(2024, 6, 15);
        let tomorrow = day(2024, 6, 16);
        assert_eq!(
            Transaction::new(expense(dec!(10), tomorrow), today),
            Err(ValidationError::FutureDate(tomorrow))
        );
        // Dated today is fine
        assert!(Transaction::new(expense(dec!(10), today), today).is_ok());
    }

    #[test]
    fn test_income_category_presence() {
        let today = day(2024, 6, 15);

        let income_without = NewTransaction {
            amount: dec!(100),
            kind: TransactionKind::Income,
            category: Category::Other,
            txn_date: today,
            income_category: None,
        };
        assert_eq!(
            Transaction::new(income_without, today),
            Err(ValidationError::MissingIncomeCategory)
        );

        let savings_with = NewTransaction {
            amount: dec!(100),
            kind: TransactionKind::Savings,
            category: Category::Other,
            txn_date: today,
            income_category: Some(IncomeCategory::Bonus),
        };
        assert_eq!(
            Transaction::new(savings_with, today),
            Err(ValidationError::UnexpectedIncomeCategory(
                TransactionKind::Savings
            ))
        );
    }

    #[test]
    fn test_validate_batch_keeps_good_records() {
        let today = day(2024, 6, 15);
        let inputs = vec![
            expense(dec!(10), today),
            expense(dec!(-1), today),
            expense(dec!(20), today),
        ];
        let (accepted, rejected) = validate_batch(inputs, today);
        assert_eq!(accepted.len(), 2);
        assert_eq!(rejected, vec![ValidationError::NonPositiveAmount(dec!(-1))]);
    }

    #[test]
    fn test_month_parse_and_display() {
        let month: Month = "2024-07".parse().unwrap();
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 7);
        assert_eq!(month.to_string(), "2024-07");

        for bad in ["2024", "2024-13", "2024-00", "24-07", "2024-7", "abcd-ef"] {
            assert!(
                matches!(
                    bad.parse::<Month>(),
                    Err(ValidationError::InvalidMonthKey(_))
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_month_contains_and_ordering() {
        let jun: Month = "2024-06".parse().unwrap();
        assert!(jun.contains(day(2024, 6, 1)));
        assert!(jun.contains(day(2024, 6, 30)));
        assert!(!jun.contains(day(2024, 7, 1)));
        assert!(!jun.contains(day(2023, 6, 15)));

        let dec23: Month = "2023-12".parse().unwrap();
        assert!(dec23 < jun);
        assert_eq!(dec23.months_until(jun), 6);
        assert_eq!(jun.months_until(dec23), -6);
    }

    #[test]
    fn test_month_serde_as_string() {
        let month: Month = "2024-07".parse().unwrap();
        assert_eq!(serde_json::to_string(&month).unwrap(), "\"2024-07\"");
        let back: Month = serde_json::from_str("\"2024-07\"").unwrap();
        assert_eq!(back, month);
    }

    #[test]
    fn test_budget_rule_rejects_non_positive_limit() {
        assert!(BudgetRule::new(Category::Health, dec!(0)).is_err());
        let rule = BudgetRule::new(Category::Health, dec!(300)).unwrap();
        assert_eq!(rule.monthly_limit(), dec!(300));
    }

    #[test]
    fn test_stress_scenario_bounds() {
        assert!(StressScenario::new("ok", dec!(0.2), dec!(0.1), 6).is_ok());
        assert!(StressScenario::new("shock", dec!(1.1), dec!(0), 6).is_err());
        assert!(StressScenario::new("spike", dec!(0), dec!(-0.1), 6).is_err());
        assert!(StressScenario::new("short", dec!(0), dec!(0), 0).is_err());
        assert!(StressScenario::new("long", dec!(0), dec!(0), 13).is_err());
    }

    #[test]
    fn test_badge_thresholds() {
        assert_eq!(BadgeName::Streak7.threshold(), 7);
        assert_eq!(BadgeName::Streak30.threshold(), 30);
        assert_eq!(BadgeName::Streak60.threshold(), 60);
    }
}
