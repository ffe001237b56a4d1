//! The ledger aggregate and timeframe reporting windows.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use uuid::Uuid;

use crate::{
    budget::BudgetState,
    common::{position_of, total_of},
    expense::{Category, Expense},
    goal::BudgetGoal,
};

#[derive(Debug, Clone, Default, PartialEq)]
/// The full in-memory tracker state: budget configuration, the ordered
/// expense ledger, and per-category goals.
///
/// Expenses keep insertion order; new records are appended. The ledger owns
/// expense identity and goal/category uniqueness — all mutation goes
/// through the service layer.
pub struct Ledger {
    pub budget: BudgetState,
    pub expenses: Vec<Expense>,
    pub goals: Vec<BudgetGoal>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expense_position(id).map(|position| &self.expenses[position])
    }

    pub fn expense_position(&self, id: Uuid) -> Option<usize> {
        position_of(&self.expenses, id)
    }

    pub fn goal(&self, category: Category) -> Option<&BudgetGoal> {
        self.goals.iter().find(|goal| goal.category == category)
    }

    pub fn has_goal(&self, category: Category) -> bool {
        self.goal(category).is_some()
    }

    /// Lifetime-to-date total of every expense in the ledger.
    pub fn total_spent(&self) -> f64 {
        total_of(&self.expenses)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Caller-chosen reporting window used to pre-filter expenses before
/// aggregation.
pub enum Timeframe {
    Week,
    Month,
    Year,
}

impl Timeframe {
    /// Returns the window containing `reference`: Monday-start weeks,
    /// calendar months, calendar years.
    pub fn window_containing(self, reference: NaiveDate) -> DateWindow {
        let start = match self {
            Timeframe::Week => {
                let offset = reference.weekday().num_days_from_monday() as i64;
                reference - Duration::days(offset)
            }
            Timeframe::Month => reference.with_day(1).expect("first of month is valid"),
            Timeframe::Year => NaiveDate::from_ymd_opt(reference.year(), 1, 1)
                .expect("first of year is valid"),
        };
        let end = match self {
            Timeframe::Week => start + Duration::weeks(1),
            Timeframe::Month => crate::common::Frequency::Monthly.next_date(start),
            Timeframe::Year => crate::common::Frequency::Yearly.next_date(start),
        };
        DateWindow { start, end }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Timeframe::Week => "Week",
            Timeframe::Month => "Month",
            Timeframe::Year => "Year",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Half-open date range `[start, end)`.
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}
