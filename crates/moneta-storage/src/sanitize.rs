//! Load-time sanitization of persisted payloads.
//!
//! Persisted data is untrusted: any key may hold a non-array, a truncated
//! document, or records written by an older build. Malformed elements are
//! dropped silently (with a `warn` for observability) so a corrupt store
//! degrades to an empty ledger instead of failing the load.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use moneta_domain::{BudgetGoal, Category, Expense, Frequency};

/// Parses the persisted expense array, keeping only well-formed records.
pub fn sanitize_expenses(raw: &str) -> Vec<Expense> {
    let Some(items) = parse_array(raw, "expenses") else {
        return Vec::new();
    };
    let mut kept = Vec::with_capacity(items.len());
    let mut dropped = 0usize;
    for item in &items {
        match expense_from_value(item) {
            Some(expense) => kept.push(expense),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!(dropped, kept = kept.len(), "dropped malformed expense records");
    }
    kept
}

/// Parses the persisted goal array. Duplicated categories keep the first
/// occurrence so the one-goal-per-category invariant holds after load.
pub fn sanitize_goals(raw: &str) -> Vec<BudgetGoal> {
    let Some(items) = parse_array(raw, "budgetGoals") else {
        return Vec::new();
    };
    let mut kept: Vec<BudgetGoal> = Vec::with_capacity(items.len());
    let mut dropped = 0usize;
    for item in &items {
        match goal_from_value(item) {
            Some(goal) if !kept.iter().any(|g| g.category == goal.category) => kept.push(goal),
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!(dropped, kept = kept.len(), "dropped malformed goal records");
    }
    kept
}

fn parse_array(raw: &str, key: &str) -> Option<Vec<Value>> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, %err, "persisted value is not valid JSON, using empty list");
            return None;
        }
    };
    match value {
        Value::Array(items) => Some(items),
        _ => {
            warn!(key, "persisted value is not an array, using empty list");
            None
        }
    }
}

fn expense_from_value(value: &Value) -> Option<Expense> {
    let object = value.as_object()?;
    let date = object.get("date")?.as_str()?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let description = object.get("description")?.as_str()?.to_string();
    let amount = object.get("amount")?.as_f64()?;
    let category = Category::parse(object.get("category")?.as_str()?)?;

    let id = object
        .get("id")
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .unwrap_or_else(Uuid::new_v4);
    let recurring = object
        .get("recurring")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let frequency = object
        .get("recurringFrequency")
        .and_then(Value::as_str)
        .and_then(Frequency::parse);

    let mut expense = Expense::new(date, description, amount, category);
    expense.id = id;
    if recurring {
        // The due date is derived state: recompute instead of trusting
        // whatever was persisted. A recurring flag without a usable
        // frequency downgrades to non-recurring.
        expense.set_recurrence(frequency);
    }
    Some(expense)
}

fn goal_from_value(value: &Value) -> Option<BudgetGoal> {
    let object = value.as_object()?;
    let category = Category::parse(object.get("category")?.as_str()?)?;
    let amount = object.get("amount")?.as_f64()?;
    if amount <= 0.0 {
        return None;
    }
    let spent = object
        .get("spent")
        .and_then(Value::as_f64)
        .filter(|spent| *spent >= 0.0)
        .unwrap_or(0.0);
    let mut goal = BudgetGoal::new(category, amount);
    goal.spent = spent;
    Some(goal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_json_and_non_array_payloads_yield_empty_ledgers() {
        assert!(sanitize_expenses("not json at all").is_empty());
        assert!(sanitize_expenses("{\"a\":1}").is_empty());
        assert!(sanitize_expenses("42").is_empty());
        assert!(sanitize_goals("null").is_empty());
    }

    #[test]
    fn keeps_valid_records_and_drops_malformed_ones() {
        let raw = r#"[
            {"date":"2024-06-01","description":"Groceries","amount":42.5,"category":"food"},
            {"date":"2024-06-02","description":"Missing amount","category":"food"},
            {"date":"2024-06-03","description":"Bad category","amount":5.0,"category":"crypto"},
            {"date":"06/04/2024","description":"Bad date","amount":5.0,"category":"food"},
            "just a string",
            {"date":"2024-06-05","description":"Cinema","amount":15.0,"category":"entertainment"}
        ]"#;
        let expenses = sanitize_expenses(raw);
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].description, "Groceries");
        assert_eq!(expenses[1].category, Category::Entertainment);
    }

    #[test]
    fn recurring_records_get_a_recomputed_due_date() {
        let raw = r#"[{
            "id":"8f4e4f9e-5cf0-49b3-8a6d-5a3f3c2e9b10",
            "date":"2024-01-31","description":"Rent","amount":1200.0,"category":"housing",
            "recurring":true,"recurringFrequency":"monthly","nextDueDate":"2024-03-15"
        }]"#;
        let expenses = sanitize_expenses(raw);
        assert_eq!(expenses.len(), 1);
        let rent = &expenses[0];
        assert_eq!(
            rent.id.to_string(),
            "8f4e4f9e-5cf0-49b3-8a6d-5a3f3c2e9b10"
        );
        // Stale persisted due date is ignored.
        assert_eq!(
            rent.next_due_date,
            Some(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
    }

    #[test]
    fn recurring_without_frequency_downgrades_to_one_off() {
        let raw = r#"[{"date":"2024-06-01","description":"Gym","amount":30.0,"category":"healthcare","recurring":true}]"#;
        let expenses = sanitize_expenses(raw);
        assert_eq!(expenses.len(), 1);
        assert!(!expenses[0].recurring);
        assert!(expenses[0].next_due_date.is_none());
    }

    #[test]
    fn goal_sanitization_enforces_category_uniqueness() {
        let raw = r#"[
            {"category":"food","amount":300.0,"spent":120.0},
            {"category":"food","amount":500.0},
            {"category":"utilities","amount":-5.0},
            {"category":"housing","amount":900.0,"spent":-1.0}
        ]"#;
        let goals = sanitize_goals(raw);
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].category, Category::Food);
        assert_eq!(goals[0].amount, 300.0);
        // Negative cached counter is discarded.
        assert_eq!(goals[1].category, Category::Housing);
        assert_eq!(goals[1].spent, 0.0);
    }
}
