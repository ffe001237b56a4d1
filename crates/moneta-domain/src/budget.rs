//! Overall budget configuration state.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Monthly budget plus the one-time setup gate.
///
/// `budget` is `None` until the user has entered a valid amount; on the
/// wire this is the empty-string sentinel. `is_setup` flips to `true` the
/// first time a positive budget is confirmed and gates the rest of the
/// tracker UI.
pub struct BudgetState {
    pub budget: Option<f64>,
    pub is_setup: bool,
}

impl BudgetState {
    pub fn configured(amount: f64) -> Self {
        Self {
            budget: Some(amount),
            is_setup: true,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.is_setup && self.budget.is_some()
    }

    pub fn amount(&self) -> Option<f64> {
        self.budget
    }
}
