use axum::http::StatusCode;
use thiserror::Error;

use crate::constants::*;

/// Errors surfaced by the finance core and its services.
///
/// Storage collaborators report failures as `anyhow::Error`; those arrive here
/// either as [`FinanceError::Storage`] or, for the two lookups a summary cannot
/// do without, as [`FinanceError::AggregationFailed`].
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("invalid month format '{0}', must be YYYY-MM")]
    InvalidMonthFormat(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("failed to load {what} for summary: {cause:#}")]
    AggregationFailed {
        what: &'static str,
        cause: anyhow::Error,
    },
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("storage failure: {0:#}")]
    Storage(anyhow::Error),
}

pub type FinanceResult<T> = Result<T, FinanceError>;

impl FinanceError {
    pub fn validation(message: impl Into<String>) -> Self {
        FinanceError::Validation(message.into())
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        FinanceError::NotFound(entity.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FinanceError::NotFound(_))
    }
}

impl From<anyhow::Error> for FinanceError {
    fn from(err: anyhow::Error) -> Self {
        FinanceError::Storage(err)
    }
}

impl From<FinanceError> for (StatusCode, String) {
    fn from(err: FinanceError) -> Self {
        match err {
            FinanceError::InvalidMonthFormat(_) => {
                (StatusCode::BAD_REQUEST, ERR_INVALID_MONTH.to_string())
            }
            FinanceError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            FinanceError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
            FinanceError::Conflict(message) => (StatusCode::CONFLICT, message),
            FinanceError::AggregationFailed { .. } => {
                tracing::error!(error = %err, "summary aggregation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ERR_SUMMARY_FAILED.to_string(),
                )
            }
            FinanceError::Storage(_) => {
                tracing::error!(error = %err, "storage operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ERR_DATABASE_OPERATION.to_string(),
                )
            }
        }
    }
}
