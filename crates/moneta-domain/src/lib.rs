//! moneta-domain
//!
//! Pure domain models (Expense, Category, BudgetGoal, Ledger, recurrence math).
//! No I/O, no storage interactions. Only data types and calendar rules.

pub mod budget;
pub mod common;
pub mod expense;
pub mod goal;
pub mod ledger;

pub use budget::*;
pub use common::*;
pub use expense::*;
pub use goal::*;
pub use ledger::*;
