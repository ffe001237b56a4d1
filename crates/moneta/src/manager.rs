//! Facade coordinating state, validation, and persistence.

use chrono::NaiveDate;
use tracing::warn;
use uuid::Uuid;

use moneta_core::{
    search, BudgetService, CategorySpend, Clock, CoreError, CurrencyFormatter, ExpenseDraft,
    ExpenseService, GoalProgress, GoalService, SummaryService, SystemClock,
};
use moneta_domain::{BudgetGoal, Category, Displayable, Expense, Ledger, Timeframe};
use moneta_storage::{hydrate, persist, StringStore};

/// An owned page of search results over the expense ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub expenses: Vec<Expense>,
    /// Effective page index after clamping into range.
    pub page_index: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl SearchResults {
    /// Renders the page as table rows: display label plus formatted amount.
    pub fn display_rows(&self, formatter: &dyn CurrencyFormatter) -> Vec<String> {
        self.expenses
            .iter()
            .map(|expense| {
                format!(
                    "{} {}",
                    expense.display_label(),
                    formatter.format_amount(expense.amount)
                )
            })
            .collect()
    }
}

/// Owns the in-memory tracker state and the storage round-trip.
///
/// Every mutation follows the same shape: validate and apply through the
/// service layer, then rewrite the full state to the store. A failed write
/// is surfaced to the caller while the in-memory mutation is retained —
/// memory stays the source of truth and the next successful save catches
/// the store up.
pub struct TrackerManager {
    ledger: Ledger,
    storage: Box<dyn StringStore>,
    clock: Box<dyn Clock>,
}

impl TrackerManager {
    /// Hydrates the tracker from the store using the system clock.
    pub fn new(storage: Box<dyn StringStore>) -> Self {
        Self::with_clock(storage, Box::new(SystemClock))
    }

    pub fn with_clock(storage: Box<dyn StringStore>, clock: Box<dyn Clock>) -> Self {
        let ledger = hydrate(storage.as_ref());
        Self {
            ledger,
            storage,
            clock,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn set_budget(&mut self, amount: f64) -> Result<(), CoreError> {
        BudgetService::set_budget(&mut self.ledger, amount)?;
        self.save()
    }

    pub fn add_expense(&mut self, draft: ExpenseDraft) -> Result<Expense, CoreError> {
        let expense = ExpenseService::add(&mut self.ledger, draft, self.clock.today())?;
        self.save()?;
        Ok(expense)
    }

    pub fn edit_expense(&mut self, id: Uuid, draft: ExpenseDraft) -> Result<Expense, CoreError> {
        let expense = ExpenseService::edit(&mut self.ledger, id, draft, self.clock.today())?;
        self.save()?;
        Ok(expense)
    }

    /// Idempotent delete; persists only when a record was actually removed.
    pub fn delete_expense(&mut self, id: Uuid) -> Result<bool, CoreError> {
        if !ExpenseService::delete(&mut self.ledger, id) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn add_goal(&mut self, category: Category, amount: f64) -> Result<BudgetGoal, CoreError> {
        let goal = GoalService::add_goal(&mut self.ledger, category, amount)?;
        self.save()?;
        Ok(goal)
    }

    pub fn remove_goal(&mut self, category: Category) -> Result<bool, CoreError> {
        if !GoalService::remove_goal(&mut self.ledger, category) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Clears all tracker state and persists the cleared snapshot.
    pub fn reset(&mut self) -> Result<(), CoreError> {
        BudgetService::reset(&mut self.ledger);
        self.save()
    }

    pub fn balance(&self) -> Option<f64> {
        BudgetService::balance(&self.ledger)
    }

    pub fn spending_overview(&self) -> Vec<CategorySpend> {
        SummaryService::spending_overview(&self.ledger.expenses)
    }

    /// Spending overview restricted to the timeframe containing today.
    pub fn spending_overview_for(&self, timeframe: Timeframe) -> Vec<CategorySpend> {
        let scoped =
            SummaryService::in_timeframe(&self.ledger.expenses, timeframe, self.clock.today());
        SummaryService::spending_overview(&scoped)
    }

    pub fn goal_progress(&self) -> Vec<GoalProgress> {
        GoalService::progress_all(&self.ledger)
    }

    /// Filters the ledger by `query` and returns the requested page.
    ///
    /// The page index is clamped against the filtered count, so narrowing a
    /// query while sitting on a late page lands on the last valid page
    /// instead of an out-of-range empty one.
    pub fn search(&self, query: &str, page_index: usize, page_size: usize) -> SearchResults {
        let filtered = search::filter(&self.ledger.expenses, query);
        let effective = search::clamped_page(filtered.len(), page_size, page_index);
        let page = search::paginate(&filtered, effective, page_size);
        SearchResults {
            expenses: page.items.to_vec(),
            page_index: effective,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }

    fn save(&mut self) -> Result<(), CoreError> {
        persist(self.storage.as_ref(), &mut self.ledger).map_err(|err| {
            warn!(%err, "persisting tracker state failed, in-memory state retained");
            err
        })
    }
}
