//! Add, edit, delete and list operations over the expense ledger.

use chrono::NaiveDate;
use uuid::Uuid;

use moneta_domain::{Category, Expense, Frequency, Ledger};

use crate::CoreError;

#[derive(Debug, Clone)]
/// Unvalidated candidate for a new or replacement expense record.
pub struct ExpenseDraft {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub frequency: Option<Frequency>,
}

impl ExpenseDraft {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        category: Category,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            category,
            frequency: None,
        }
    }

    pub fn recurring(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }
}

/// Owns validation and mutation of the expense ledger.
///
/// `today` is injected by the caller so date validation stays deterministic
/// under test; services never read the system clock themselves.
pub struct ExpenseService;

impl ExpenseService {
    /// Validates the draft, assigns a fresh id, computes the next due date
    /// for recurring expenses and appends the record to the ledger.
    pub fn add(
        ledger: &mut Ledger,
        draft: ExpenseDraft,
        today: NaiveDate,
    ) -> Result<Expense, CoreError> {
        Self::validate(&draft, today)?;
        let mut expense = Expense::new(
            draft.date,
            draft.description.trim(),
            draft.amount,
            draft.category,
        );
        expense.set_recurrence(draft.frequency);
        ledger.expenses.push(expense.clone());
        Ok(expense)
    }

    /// Replaces the full record matching `id`, revalidating the draft and
    /// recomputing the due date. Editing a missing id is a hard error.
    pub fn edit(
        ledger: &mut Ledger,
        id: Uuid,
        draft: ExpenseDraft,
        today: NaiveDate,
    ) -> Result<Expense, CoreError> {
        Self::validate(&draft, today)?;
        let position = ledger
            .expense_position(id)
            .ok_or(CoreError::ExpenseNotFound(id))?;
        let mut replacement = Expense::new(
            draft.date,
            draft.description.trim(),
            draft.amount,
            draft.category,
        );
        replacement.id = id;
        replacement.set_recurrence(draft.frequency);
        ledger.expenses[position] = replacement.clone();
        Ok(replacement)
    }

    /// Removes the record matching `id`. Deleting an id that is already
    /// gone is an idempotent no-op; the return value reports whether a
    /// record was removed.
    pub fn delete(ledger: &mut Ledger, id: Uuid) -> bool {
        match ledger.expense_position(id) {
            Some(position) => {
                ledger.expenses.remove(position);
                true
            }
            None => false,
        }
    }

    /// Read-only view of the ledger in insertion order.
    pub fn list(ledger: &Ledger) -> &[Expense] {
        &ledger.expenses
    }

    /// Display ordering for the expense table: newest date first, ties kept
    /// in insertion order.
    pub fn by_date_desc(ledger: &Ledger) -> Vec<Expense> {
        let mut expenses = ledger.expenses.clone();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        expenses
    }

    fn validate(draft: &ExpenseDraft, today: NaiveDate) -> Result<(), CoreError> {
        if draft.description.trim().is_empty() {
            return Err(CoreError::Validation(
                "description must not be empty".into(),
            ));
        }
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(CoreError::Validation(
                "amount must be greater than zero".into(),
            ));
        }
        if draft.date > today {
            return Err(CoreError::Validation(
                "date must not be in the future".into(),
            ));
        }
        Ok(())
    }
}
