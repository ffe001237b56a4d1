use moneta_domain::Category;
use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the tracker core and its storage adapters.
///
/// Every failure is a value returned to the caller; nothing in the core
/// terminates the process. Load-time corruption is not represented here at
/// all — the persistence adapter degrades to safe defaults instead.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("A goal already exists for category: {0}")]
    DuplicateGoal(Category),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}
