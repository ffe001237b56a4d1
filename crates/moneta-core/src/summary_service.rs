//! Aggregation helpers: category totals, spending overview, balance.

use chrono::NaiveDate;

use moneta_domain::{total_of, Category, Expense, Ledger, Timeframe};

/// One row of the spending-by-category overview.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpend {
    pub category: Category,
    pub amount: f64,
    /// Share of the total, 0–100. Zero for every row when the total is zero.
    pub percentage: f64,
}

/// Stateless aggregation over expense snapshots.
///
/// Callers wanting a timeframe-scoped view pre-filter the slice (see
/// [`SummaryService::in_timeframe`]) before aggregating; the aggregator
/// itself never consults a clock.
pub struct SummaryService;

impl SummaryService {
    /// Sums amounts grouped by category, in first-seen category order.
    pub fn category_totals(expenses: &[Expense]) -> Vec<(Category, f64)> {
        let mut totals: Vec<(Category, f64)> = Vec::new();
        for expense in expenses {
            match totals
                .iter_mut()
                .find(|(category, _)| *category == expense.category)
            {
                Some((_, amount)) => *amount += expense.amount,
                None => totals.push((expense.category, expense.amount)),
            }
        }
        totals
    }

    /// Per-category totals with their share of overall spending.
    pub fn spending_overview(expenses: &[Expense]) -> Vec<CategorySpend> {
        let total = Self::total(expenses);
        Self::category_totals(expenses)
            .into_iter()
            .map(|(category, amount)| CategorySpend {
                category,
                amount,
                percentage: if total > 0.0 {
                    (amount / total) * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }

    pub fn total(expenses: &[Expense]) -> f64 {
        total_of(expenses)
    }

    /// Budget minus the sum of the supplied expenses. Lifetime-to-date
    /// unless the caller pre-filtered the slice.
    pub fn balance(budget: f64, expenses: &[Expense]) -> f64 {
        budget - Self::total(expenses)
    }

    /// Remaining balance against the configured budget, if one is set.
    pub fn remaining(ledger: &Ledger) -> Option<f64> {
        ledger
            .budget
            .amount()
            .map(|budget| Self::balance(budget, &ledger.expenses))
    }

    /// The subset of expenses dated inside the timeframe containing
    /// `reference`.
    pub fn in_timeframe(
        expenses: &[Expense],
        timeframe: Timeframe,
        reference: NaiveDate,
    ) -> Vec<Expense> {
        let window = timeframe.window_containing(reference);
        expenses
            .iter()
            .filter(|expense| window.contains(expense.date))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_expenses() -> Vec<Expense> {
        vec![
            Expense::new(date(2024, 6, 1), "Groceries", 60.0, Category::Food),
            Expense::new(date(2024, 6, 3), "Bus pass", 25.0, Category::Transportation),
            Expense::new(date(2024, 6, 5), "Takeaway", 40.0, Category::Food),
            Expense::new(date(2024, 6, 8), "Cinema", 15.0, Category::Entertainment),
        ]
    }

    #[test]
    fn category_totals_conserve_the_input_sum() {
        let expenses = sample_expenses();
        let totals = SummaryService::category_totals(&expenses);
        let grouped: f64 = totals.iter().map(|(_, amount)| amount).sum();
        assert!((grouped - SummaryService::total(&expenses)).abs() < 1e-9);
    }

    #[test]
    fn category_totals_keep_first_seen_order() {
        let totals = SummaryService::category_totals(&sample_expenses());
        let categories: Vec<Category> = totals.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            categories,
            vec![
                Category::Food,
                Category::Transportation,
                Category::Entertainment
            ]
        );
        assert!((totals[0].1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn overview_percentages_sum_to_one_hundred() {
        let overview = SummaryService::spending_overview(&sample_expenses());
        let sum: f64 = overview.iter().map(|row| row.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn overview_is_all_zero_percent_when_total_is_zero() {
        let overview = SummaryService::spending_overview(&[]);
        assert!(overview.is_empty());

        // Regression guard for division by zero on an all-zero snapshot:
        // zero-amount records never enter the ledger through validation,
        // but the aggregator must not assume that.
        let zeroed = vec![Expense::new(date(2024, 6, 1), "Void", 0.0, Category::Other)];
        let overview = SummaryService::spending_overview(&zeroed);
        assert_eq!(overview.len(), 1);
        assert_eq!(overview[0].percentage, 0.0);
    }

    #[test]
    fn balance_subtracts_all_supplied_expenses() {
        let expenses = sample_expenses();
        assert!((SummaryService::balance(500.0, &expenses) - 360.0).abs() < 1e-9);

        let mut ledger = Ledger::new();
        ledger.expenses = expenses;
        assert_eq!(SummaryService::remaining(&ledger), None);
        ledger.budget = moneta_domain::BudgetState::configured(500.0);
        assert!((SummaryService::remaining(&ledger).unwrap() - 360.0).abs() < 1e-9);
    }

    #[test]
    fn timeframe_filter_scopes_aggregation() {
        let mut expenses = sample_expenses();
        expenses.push(Expense::new(
            date(2024, 5, 28),
            "Last month",
            99.0,
            Category::Food,
        ));

        let june = SummaryService::in_timeframe(&expenses, Timeframe::Month, date(2024, 6, 15));
        assert_eq!(june.len(), 4);
        assert!((SummaryService::total(&june) - 140.0).abs() < 1e-9);

        let week = SummaryService::in_timeframe(&expenses, Timeframe::Week, date(2024, 6, 5));
        // Week of Mon 2024-06-03 through Sun 2024-06-09.
        assert_eq!(week.len(), 3);
    }
}
