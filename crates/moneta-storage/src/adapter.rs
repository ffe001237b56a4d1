//! Hydration and persistence of the tracker state.
//!
//! The state lives under four independent keys. On load any key may be
//! absent or corrupt; each degrades to its safe default (`None`, `false`,
//! empty, empty) independently of the others. On save all four keys are
//! rewritten so they stay mutually consistent.

use tracing::{info, warn};

use moneta_core::{CoreError, GoalService};
use moneta_domain::{BudgetState, Ledger};

use crate::{sanitize_expenses, sanitize_goals, store::StringStore};

pub const BUDGET_KEY: &str = "budget";
pub const SETUP_KEY: &str = "isSetup";
pub const EXPENSES_KEY: &str = "expenses";
pub const GOALS_KEY: &str = "budgetGoals";

/// Rebuilds the in-memory ledger from the store. Never fails: unreadable
/// or corrupt keys fall back to defaults.
pub fn hydrate(store: &dyn StringStore) -> Ledger {
    let budget = read_key(store, BUDGET_KEY)
        .and_then(|raw| parse_budget(&raw))
        .filter(|amount| *amount > 0.0);
    let is_setup = read_key(store, SETUP_KEY)
        .map(|raw| raw.trim() == "true")
        .unwrap_or(false);
    let expenses = read_key(store, EXPENSES_KEY)
        .map(|raw| sanitize_expenses(&raw))
        .unwrap_or_default();
    let goals = read_key(store, GOALS_KEY)
        .map(|raw| sanitize_goals(&raw))
        .unwrap_or_default();

    info!(
        expenses = expenses.len(),
        goals = goals.len(),
        configured = budget.is_some(),
        "hydrated tracker state"
    );
    let mut ledger = Ledger {
        budget: BudgetState { budget, is_setup },
        expenses,
        goals,
    };
    GoalService::reconcile(&mut ledger);
    ledger
}

/// Serializes the full state back out, rewriting all four keys.
///
/// The caller keeps its in-memory ledger regardless of the outcome: a
/// failed write is reported, never retried here, and never rolls back the
/// mutation that triggered it.
pub fn persist(store: &dyn StringStore, ledger: &mut Ledger) -> Result<(), CoreError> {
    GoalService::reconcile(ledger);

    let budget_text = match ledger.budget.amount() {
        Some(amount) => amount.to_string(),
        None => String::new(),
    };
    let setup_text = if ledger.budget.is_setup {
        "true"
    } else {
        "false"
    };
    let expenses_json =
        serde_json::to_string(&ledger.expenses).map_err(|err| CoreError::Serde(err.to_string()))?;
    let goals_json =
        serde_json::to_string(&ledger.goals).map_err(|err| CoreError::Serde(err.to_string()))?;

    store.set(BUDGET_KEY, &budget_text)?;
    store.set(SETUP_KEY, setup_text)?;
    store.set(EXPENSES_KEY, &expenses_json)?;
    store.set(GOALS_KEY, &goals_json)?;
    Ok(())
}

fn read_key(store: &dyn StringStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, %err, "store read failed, treating key as absent");
            None
        }
    }
}

fn parse_budget(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        // Empty string is the documented "not yet configured" sentinel.
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Some(amount),
        _ => {
            warn!(raw = trimmed, "persisted budget is not numeric, ignoring");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use moneta_core::{BudgetService, ExpenseDraft, ExpenseService};
    use moneta_domain::{Category, Frequency};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    #[test]
    fn empty_store_hydrates_to_defaults() {
        let store = MemoryStore::new();
        let ledger = hydrate(&store);
        assert_eq!(ledger.budget.amount(), None);
        assert!(!ledger.budget.is_setup);
        assert!(ledger.expenses.is_empty());
        assert!(ledger.goals.is_empty());
    }

    #[test]
    fn corrupt_keys_degrade_independently() {
        let store = MemoryStore::new();
        store.seed(BUDGET_KEY, "a lot");
        store.seed(SETUP_KEY, "yes please");
        store.seed(EXPENSES_KEY, "{broken");
        store.seed(
            GOALS_KEY,
            r#"[{"category":"food","amount":250.0,"spent":10.0}]"#,
        );

        let ledger = hydrate(&store);
        assert_eq!(ledger.budget.amount(), None);
        assert!(!ledger.budget.is_setup);
        assert!(ledger.expenses.is_empty());
        // The one readable key still loads.
        assert_eq!(ledger.goals.len(), 1);
        // Cached spent is reconciled against the (empty) expense ledger.
        assert_eq!(ledger.goals[0].spent, 0.0);
    }

    #[test]
    fn round_trip_preserves_order_and_fields() {
        let store = MemoryStore::new();
        let mut ledger = Ledger::new();
        BudgetService::set_budget(&mut ledger, 1800.0).expect("budget");
        for (day, name, amount, category) in [
            (1, "Groceries", 55.0, Category::Food),
            (3, "Metro card", 30.0, Category::Transportation),
            (5, "Electricity", 80.0, Category::Utilities),
        ] {
            let draft = ExpenseDraft::new(date(2024, 6, day), name, amount, category);
            ExpenseService::add(&mut ledger, draft, today()).expect("add");
        }
        let rent = ExpenseDraft::new(date(2024, 1, 31), "Rent", 1200.0, Category::Housing)
            .recurring(Frequency::Monthly);
        ExpenseService::add(&mut ledger, rent, today()).expect("add rent");

        persist(&store, &mut ledger).expect("persist");
        let reloaded = hydrate(&store);
        assert_eq!(reloaded, ledger);
        assert_eq!(
            reloaded.expenses[3].next_due_date,
            Some(date(2024, 2, 29))
        );
    }

    #[test]
    fn persist_rewrites_all_four_keys() {
        let store = MemoryStore::new();
        let mut ledger = Ledger::new();
        persist(&store, &mut ledger).expect("persist");

        assert_eq!(store.get(BUDGET_KEY).unwrap().as_deref(), Some(""));
        assert_eq!(store.get(SETUP_KEY).unwrap().as_deref(), Some("false"));
        assert_eq!(store.get(EXPENSES_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get(GOALS_KEY).unwrap().as_deref(), Some("[]"));

        BudgetService::set_budget(&mut ledger, 950.5).expect("budget");
        persist(&store, &mut ledger).expect("persist");
        assert_eq!(store.get(BUDGET_KEY).unwrap().as_deref(), Some("950.5"));
        assert_eq!(store.get(SETUP_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn persist_reconciles_goal_counters() {
        let store = MemoryStore::new();
        let mut ledger = Ledger::new();
        moneta_core::GoalService::add_goal(&mut ledger, Category::Food, 400.0).expect("goal");
        let draft = ExpenseDraft::new(date(2024, 6, 2), "Brunch", 35.0, Category::Food);
        ExpenseService::add(&mut ledger, draft, today()).expect("add");
        ledger.goals[0].spent = 123.0; // stale cache

        persist(&store, &mut ledger).expect("persist");
        let goals_json = store.get(GOALS_KEY).unwrap().unwrap();
        assert!(goals_json.contains("\"spent\":35.0"));
    }

    #[test]
    fn one_malformed_element_among_valid_ones_is_dropped() {
        let store = MemoryStore::new();
        store.seed(
            EXPENSES_KEY,
            r#"[
                {"date":"2024-06-01","description":"A","amount":1.0,"category":"food"},
                {"date":"2024-06-02","description":"B","amount":"not a number","category":"food"},
                {"date":"2024-06-03","description":"C","amount":3.0,"category":"other"}
            ]"#,
        );
        let ledger = hydrate(&store);
        assert_eq!(ledger.expenses.len(), 2);
        let names: Vec<&str> = ledger
            .expenses
            .iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }
}
