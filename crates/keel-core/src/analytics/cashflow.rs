//! Cashflow summarization
//!
//! Monthly income/expense/net rollups and the per-category expense breakdown
//! the budget evaluator consumes. All sums are plain Decimal folds, so the
//! results are independent of input order.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use crate::models::{Category, Month, Transaction, TransactionKind};

use super::types::{CashflowSummary, KindTotals};

/// Roll up one calendar month into income/expense/net totals.
///
/// Savings outflows are neither income nor expense here; they reduce
/// [`net_cash_flow`] and show up in [`totals_by_kind`].
pub fn summarise_month(transactions: &[Transaction], month: Month) -> CashflowSummary {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;

    for txn in transactions.iter().filter(|t| month.contains(t.txn_date())) {
        match txn.kind() {
            TransactionKind::Income => income += txn.amount(),
            TransactionKind::Expense => expense += txn.amount(),
            TransactionKind::Savings => {}
        }
    }

    CashflowSummary {
        month,
        income,
        expense,
        net: income - expense,
    }
}

/// Global net over every given transaction: the sum of signed amounts.
pub fn net_cash_flow(transactions: &[Transaction]) -> Decimal {
    transactions.iter().map(Transaction::signed_amount).sum()
}

/// Expense totals per category for one month.
///
/// Every category is present in the result; unspent ones map to zero so the
/// evaluator never has to distinguish "absent" from "nothing spent".
pub fn expense_breakdown(
    transactions: &[Transaction],
    month: Month,
) -> BTreeMap<Category, Decimal> {
    let mut breakdown: BTreeMap<Category, Decimal> =
        Category::ALL.iter().map(|&c| (c, Decimal::ZERO)).collect();

    for txn in transactions {
        if txn.kind() == TransactionKind::Expense && month.contains(txn.txn_date()) {
            *breakdown.entry(txn.category()).or_default() += txn.amount();
        }
    }

    breakdown
}

/// Lifetime totals per kind - the dashboard headline figures.
pub fn totals_by_kind(transactions: &[Transaction]) -> KindTotals {
    let mut totals = KindTotals::default();
    for txn in transactions {
        match txn.kind() {
            TransactionKind::Income => totals.income += txn.amount(),
            TransactionKind::Expense => totals.expense += txn.amount(),
            TransactionKind::Savings => totals.savings += txn.amount(),
        }
    }
    totals
}

/// Distinct months that have at least one transaction, ascending.
pub fn months_with_activity(transactions: &[Transaction]) -> Vec<Month> {
    let months: BTreeSet<Month> = transactions
        .iter()
        .map(|t| Month::of(t.txn_date()))
        .collect();
    months.into_iter().collect()
}
