//! moneta-core
//!
//! Business logic for the expense tracker. Stateless services operating on
//! [`moneta_domain::Ledger`] snapshots. Depends on moneta-domain. No CLI,
//! no terminal I/O, no direct storage interactions.

pub mod budget_service;
pub mod error;
pub mod expense_service;
pub mod format;
pub mod goal_service;
pub mod search;
pub mod summary_service;
pub mod time;

pub use budget_service::*;
pub use error::CoreError;
pub use expense_service::*;
pub use format::*;
pub use goal_service::*;
pub use search::*;
pub use summary_service::*;
pub use time::*;
