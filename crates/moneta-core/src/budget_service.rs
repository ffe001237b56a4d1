//! Budget setup, reset, and the overall balance.

use moneta_domain::{BudgetState, Ledger};

use crate::{CoreError, SummaryService};

/// Manages the monthly budget and the one-time setup gate.
pub struct BudgetService;

impl BudgetService {
    /// Confirms the monthly budget. The first valid amount also flips the
    /// setup gate; an invalid amount is rejected and the gate stays closed.
    pub fn set_budget(ledger: &mut Ledger, amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::Validation(
                "budget must be greater than zero".into(),
            ));
        }
        ledger.budget = BudgetState::configured(amount);
        Ok(())
    }

    /// Clears the budget, the setup flag, all expenses and all goals.
    pub fn reset(ledger: &mut Ledger) {
        *ledger = Ledger::new();
    }

    /// Budget minus lifetime spending, once a budget is configured.
    pub fn balance(ledger: &Ledger) -> Option<f64> {
        SummaryService::remaining(ledger)
    }
}
