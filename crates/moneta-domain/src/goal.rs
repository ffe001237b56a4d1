//! Domain model for per-category budget goals.

use serde::{Deserialize, Serialize};

use crate::expense::{Category, Expense};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A target spending ceiling for one category. At most one goal per category.
pub struct BudgetGoal {
    pub category: Category,
    pub amount: f64,
    /// Cached running total, kept on the wire for compatibility.
    ///
    /// The ledger is the source of truth: readers recompute spending from
    /// the expense snapshot and writers reconcile this field before
    /// persisting, so it can never drift after edits or deletes.
    #[serde(default)]
    pub spent: f64,
}

impl BudgetGoal {
    pub fn new(category: Category, amount: f64) -> Self {
        Self {
            category,
            amount,
            spent: 0.0,
        }
    }

    /// Sums the amounts of all expenses in this goal's category.
    pub fn spent_in(&self, expenses: &[Expense]) -> f64 {
        expenses
            .iter()
            .filter(|expense| expense.category == self.category)
            .map(|expense| expense.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn spent_in_only_counts_matching_category() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let expenses = vec![
            Expense::new(date, "Groceries", 80.0, Category::Food),
            Expense::new(date, "Cinema", 15.0, Category::Entertainment),
            Expense::new(date, "Takeaway", 20.0, Category::Food),
        ];
        let goal = BudgetGoal::new(Category::Food, 200.0);
        assert!((goal.spent_in(&expenses) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_spent_field_defaults_to_zero() {
        let goal: BudgetGoal =
            serde_json::from_str(r#"{"category":"housing","amount":900.0}"#).unwrap();
        assert_eq!(goal.spent, 0.0);
        assert_eq!(goal.category, Category::Housing);
    }
}
