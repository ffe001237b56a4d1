//! Per-category goal management and progress reporting.

use moneta_domain::{BudgetGoal, Category, Expense, Ledger};

use crate::CoreError;

#[derive(Debug, Clone, PartialEq)]
/// Spending progress against one goal, recomputed fresh from the ledger.
pub struct GoalProgress {
    pub category: Category,
    pub target: f64,
    pub spent: f64,
    /// 100 · spent / target. Values above 100 signal over-budget.
    pub percentage: f64,
}

impl GoalProgress {
    pub fn is_over_budget(&self) -> bool {
        self.spent > self.target
    }

    /// Amount spent beyond the target, when over budget.
    pub fn amount_over(&self) -> Option<f64> {
        self.is_over_budget().then(|| self.spent - self.target)
    }
}

/// Enforces goal/category uniqueness and reports progress.
///
/// Progress is always derived from the expense snapshot at call time — the
/// cached `spent` counter on [`BudgetGoal`] is never trusted, so edits and
/// deletes can never leave a stale total behind.
pub struct GoalService;

impl GoalService {
    /// Adds a goal for `category`. At most one goal per category.
    pub fn add_goal(
        ledger: &mut Ledger,
        category: Category,
        amount: f64,
    ) -> Result<BudgetGoal, CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::Validation(
                "goal amount must be greater than zero".into(),
            ));
        }
        if ledger.has_goal(category) {
            return Err(CoreError::DuplicateGoal(category));
        }
        let goal = BudgetGoal::new(category, amount);
        ledger.goals.push(goal.clone());
        Ok(goal)
    }

    /// Removes the goal for `category`, reporting whether one existed.
    pub fn remove_goal(ledger: &mut Ledger, category: Category) -> bool {
        let before = ledger.goals.len();
        ledger.goals.retain(|goal| goal.category != category);
        ledger.goals.len() != before
    }

    /// Progress for one goal against the supplied expense snapshot.
    pub fn progress(goal: &BudgetGoal, expenses: &[Expense]) -> GoalProgress {
        let spent = goal.spent_in(expenses);
        GoalProgress {
            category: goal.category,
            target: goal.amount,
            spent,
            percentage: (spent / goal.amount) * 100.0,
        }
    }

    /// Progress for every goal in the ledger, in goal insertion order.
    pub fn progress_all(ledger: &Ledger) -> Vec<GoalProgress> {
        ledger
            .goals
            .iter()
            .map(|goal| Self::progress(goal, &ledger.expenses))
            .collect()
    }

    /// Rewrites each goal's cached `spent` counter from the ledger truth.
    /// Called by the persistence adapter before every save.
    pub fn reconcile(ledger: &mut Ledger) {
        let expenses = ledger.expenses.clone();
        for goal in &mut ledger.goals {
            goal.spent = goal.spent_in(&expenses);
        }
    }
}
