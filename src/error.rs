//! Error types shared across the engine

use thiserror::Error;

/// Errors raised by solvers and ledger loading
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("no cash flows supplied")]
    EmptyCashFlows,

    /// XIRR needs at least one outflow and one inflow
    #[error("cash flows must contain at least one positive and one negative amount")]
    NoSignChange,

    #[error("solver did not converge after {iterations} iterations")]
    DidNotConverge { iterations: u32 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid value {value:?} for field `{field}`")]
    InvalidRecord { field: &'static str, value: String },

    #[error("required ledger file not found: {0}")]
    MissingFile(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl FinanceError {
    pub(crate) fn invalid_record(field: &'static str, value: impl Into<String>) -> Self {
        FinanceError::InvalidRecord {
            field,
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinanceError>;
