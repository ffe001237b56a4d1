//! moneta
//!
//! Facade for the personal-finance tracker: wires the domain model, the
//! service layer and the persistence adapter together behind a single
//! [`TrackerManager`], and owns process-level concerns (tracing setup,
//! user configuration).

pub mod config;
pub mod manager;

pub use config::{Config, ConfigError, ConfigManager};
pub use manager::{SearchResults, TrackerManager};

pub use moneta_core::{
    BudgetService, CategorySpend, Clock, CoreError, CurrencyFormatter, ExpenseDraft,
    ExpenseService, GoalProgress, GoalService, PlainFormatter, SummaryService, SystemClock,
};
pub use moneta_domain::{
    BudgetGoal, BudgetState, Category, Expense, Frequency, Ledger, Timeframe,
};
pub use moneta_storage::{DirectoryStore, MemoryStore, StringStore};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env().add_directive("moneta=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}
