//! Budget evaluation
//!
//! Compares actual category spend against planned monthly limits and raises
//! the alerts the dashboard shows. Input is the rule set resolved for one
//! month plus that month's expense breakdown from
//! [`cashflow::expense_breakdown`](super::cashflow::expense_breakdown).

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use crate::models::{BudgetRule, Category};

use super::types::{Alert, BudgetEvaluation, BudgetResult};

/// Alert thresholds for the evaluator.
///
/// The defaults are the product's fixed policy; tests and previews can pass
/// a custom one to [`evaluate_with_policy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetPolicy {
    /// Usage percentage above which a warning alert fires (exceeding the
    /// danger threshold takes precedence)
    pub warning_threshold: Decimal,
    /// Usage percentage above which a danger alert fires
    pub danger_threshold: Decimal,
    /// Overspent-category count at which the global drift alert fires
    pub drift_category_count: usize,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            warning_threshold: Decimal::from(90),
            danger_threshold: Decimal::from(100),
            drift_category_count: 3,
        }
    }
}

/// Evaluate with the default policy.
pub fn evaluate(rules: &[BudgetRule], breakdown: &BTreeMap<Category, Decimal>) -> BudgetEvaluation {
    evaluate_with_policy(rules, breakdown, &BudgetPolicy::default())
}

/// Evaluate one month's spend against its budget rules.
///
/// Categories without a rule (except the Other catch-all) get an implicit
/// zero-planned row so unbudgeted spend stays visible; their usage is forced
/// to 100 when anything was spent (the zero-planned ratio is otherwise
/// undefined) and they never raise per-category alerts. Results come back
/// sorted by category name.
pub fn evaluate_with_policy(
    rules: &[BudgetRule],
    breakdown: &BTreeMap<Category, Decimal>,
    policy: &BudgetPolicy,
) -> BudgetEvaluation {
    let mut results = Vec::new();
    let mut alerts = Vec::new();
    let mut total_planned = Decimal::ZERO;
    let mut total_actual = Decimal::ZERO;

    let ruled: BTreeSet<Category> = rules.iter().map(BudgetRule::category).collect();

    // Implicit rows for unbudgeted categories
    for (&category, &actual) in breakdown {
        if category == Category::Other || ruled.contains(&category) {
            continue;
        }
        let usage_percent = if actual > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
        results.push(BudgetResult {
            category,
            planned: Decimal::ZERO,
            actual,
            remaining: -actual,
            usage_percent,
            overspent: false,
        });
        total_actual += actual;
    }

    for rule in rules {
        let category = rule.category();
        let planned = rule.monthly_limit();
        let actual = breakdown.get(&category).copied().unwrap_or_default();

        // planned > 0 holds by construction; the guard keeps the zero case
        // a defined result rather than a panicking division
        let usage_percent = if planned.is_zero() {
            Decimal::ZERO
        } else {
            actual / planned * Decimal::ONE_HUNDRED
        };
        let overspent = usage_percent > Decimal::ONE_HUNDRED;

        if usage_percent > policy.danger_threshold {
            alerts.push(Alert::danger(format!(
                "You have exceeded your budget for {category}!"
            )));
        } else if usage_percent > policy.warning_threshold {
            alerts.push(Alert::warning(format!(
                "You're at {}% of your budget for {category}.",
                usage_percent.round_dp(1)
            )));
        }

        results.push(BudgetResult {
            category,
            planned,
            actual,
            remaining: planned - actual,
            usage_percent,
            overspent,
        });
        total_planned += planned;
        total_actual += actual;
    }

    results.sort_by_key(|r| r.category.as_str());

    let overspent_count = results.iter().filter(|r| r.overspent).count();
    if overspent_count >= policy.drift_category_count {
        alerts.push(Alert::danger(
            "Spending is drifting from plan in multiple areas.",
        ));
    }

    BudgetEvaluation {
        results,
        alerts,
        total_planned,
        total_actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::types::Severity;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn breakdown(entries: &[(Category, Decimal)]) -> BTreeMap<Category, Decimal> {
        let mut map: BTreeMap<Category, Decimal> =
            Category::ALL.iter().map(|&c| (c, Decimal::ZERO)).collect();
        for &(category, amount) in entries {
            map.insert(category, amount);
        }
        map
    }

    fn rule(category: Category, limit: Decimal) -> BudgetRule {
        BudgetRule::new(category, limit).unwrap()
    }

    fn result_for(evaluation: &BudgetEvaluation, category: Category) -> &BudgetResult {
        evaluation
            .results
            .iter()
            .find(|r| r.category == category)
            .unwrap()
    }

    #[test]
    fn test_overspend_produces_danger_alert() {
        let rules = vec![rule(Category::EssentialSpending, dec!(1000))];
        let spend = breakdown(&[(Category::EssentialSpending, dec!(1100))]);
        let evaluation = evaluate(&rules, &spend);

        let row = result_for(&evaluation, Category::EssentialSpending);
        assert_eq!(row.usage_percent, dec!(110));
        assert_eq!(row.remaining, dec!(-100));
        assert!(row.overspent);

        let dangers: Vec<_> = evaluation
            .alerts
            .iter()
            .filter(|a| a.severity == Severity::Danger)
            .collect();
        assert_eq!(dangers.len(), 1);
        assert!(dangers[0].message.contains("Essential Spending"));
    }

    #[test]
    fn test_near_limit_produces_warning_not_danger() {
        let rules = vec![rule(Category::Health, dec!(1000))];
        let spend = breakdown(&[(Category::Health, dec!(950))]);
        let evaluation = evaluate(&rules, &spend);

        let row = result_for(&evaluation, Category::Health);
        assert_eq!(row.usage_percent, dec!(95));
        assert!(!row.overspent);

        assert_eq!(evaluation.alerts.len(), 1);
        assert_eq!(evaluation.alerts[0].severity, Severity::Warning);
        assert!(evaluation.alerts[0].message.contains("95"));
    }

    #[test]
    fn test_exactly_at_limit_warns() {
        let rules = vec![rule(Category::Education, dec!(200))];
        let spend = breakdown(&[(Category::Education, dec!(200))]);
        let evaluation = evaluate(&rules, &spend);

        assert_eq!(evaluation.alerts.len(), 1);
        assert_eq!(evaluation.alerts[0].severity, Severity::Warning);
        assert!(!result_for(&evaluation, Category::Education).overspent);
    }

    #[test]
    fn test_under_ninety_percent_is_quiet() {
        let rules = vec![rule(Category::Health, dec!(1000))];
        let spend = breakdown(&[(Category::Health, dec!(900))]);
        let evaluation = evaluate(&rules, &spend);
        assert!(evaluation.alerts.is_empty());
    }

    #[test]
    fn test_implicit_entries_for_unbudgeted_spend() {
        let rules = vec![rule(Category::Health, dec!(300))];
        let spend = breakdown(&[
            (Category::Health, dec!(100)),
            (Category::Investment, dec!(250)),
            // Spend in the catch-all never synthesizes a row
            (Category::Other, dec!(40)),
        ]);
        let evaluation = evaluate(&rules, &spend);

        let implicit = result_for(&evaluation, Category::Investment);
        assert_eq!(implicit.planned, Decimal::ZERO);
        assert_eq!(implicit.actual, dec!(250));
        assert_eq!(implicit.remaining, dec!(-250));
        assert_eq!(implicit.usage_percent, dec!(100));
        assert!(!implicit.overspent);

        assert!(!evaluation.results.iter().any(|r| r.category == Category::Other));

        // Unspent unbudgeted categories still get a zero row
        let idle = result_for(&evaluation, Category::Education);
        assert_eq!(idle.actual, Decimal::ZERO);
        assert_eq!(idle.usage_percent, Decimal::ZERO);

        // Implicit rows stay out of the alert stream
        assert!(evaluation.alerts.is_empty());
    }

    #[test]
    fn test_totals_accumulate_planned_and_actual() {
        let rules = vec![
            rule(Category::Health, dec!(300)),
            rule(Category::Education, dec!(200)),
        ];
        let spend = breakdown(&[
            (Category::Health, dec!(120)),
            (Category::Education, dec!(80)),
            (Category::Investment, dec!(50)),
        ]);
        let evaluation = evaluate(&rules, &spend);

        assert_eq!(evaluation.total_planned, dec!(500));
        assert_eq!(evaluation.total_actual, dec!(250));
    }

    #[test]
    fn test_three_overspent_categories_trigger_drift_alert() {
        let rules = vec![
            rule(Category::EssentialSpending, dec!(100)),
            rule(Category::Health, dec!(100)),
            rule(Category::Education, dec!(100)),
        ];
        let spend = breakdown(&[
            (Category::EssentialSpending, dec!(150)),
            (Category::Health, dec!(120)),
            (Category::Education, dec!(101)),
        ]);
        let evaluation = evaluate(&rules, &spend);

        let drift: Vec<_> = evaluation
            .alerts
            .iter()
            .filter(|a| a.message.contains("multiple areas"))
            .collect();
        assert_eq!(drift.len(), 1);
        assert_eq!(drift[0].severity, Severity::Danger);
        // Three per-category dangers plus the global one
        assert_eq!(evaluation.alerts.len(), 4);
    }

    #[test]
    fn test_two_overspent_categories_do_not_trigger_drift() {
        let rules = vec![
            rule(Category::EssentialSpending, dec!(100)),
            rule(Category::Health, dec!(100)),
        ];
        let spend = breakdown(&[
            (Category::EssentialSpending, dec!(150)),
            (Category::Health, dec!(120)),
        ]);
        let evaluation = evaluate(&rules, &spend);
        assert!(!evaluation.alerts.iter().any(|a| a.message.contains("multiple areas")));
    }

    #[test]
    fn test_results_sorted_by_category_name() {
        let rules = vec![
            rule(Category::Investment, dec!(100)),
            rule(Category::Education, dec!(100)),
        ];
        let spend = breakdown(&[]);
        let evaluation = evaluate(&rules, &spend);

        let names: Vec<&str> = evaluation.results.iter().map(|r| r.category.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_custom_policy_thresholds() {
        let policy = BudgetPolicy {
            warning_threshold: Decimal::from(50),
            danger_threshold: Decimal::from(75),
            drift_category_count: 1,
        };
        let rules = vec![rule(Category::Health, dec!(100))];
        let spend = breakdown(&[(Category::Health, dec!(80))]);
        let evaluation = evaluate_with_policy(&rules, &spend, &policy);

        assert_eq!(evaluation.alerts.len(), 1);
        assert_eq!(evaluation.alerts[0].severity, Severity::Danger);
    }
}
