//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Validation Errors**: request failed a precondition; nothing was stored
/// - **Ledger Errors**: the account service refused a balance mutation or could not be reached
/// - **Internal Errors**: unexpected failures while talking to the account service
/// - **Database Errors**: any sqlx::Error from the transaction store
/// - **Authentication Errors**: the caller sent no credential to forward
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// Returns HTTP 500; details are hidden from the client.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No `Authorization` header to forward to the account service.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("{0}")]
    Unauthorized(String),

    /// Request body failed validation.
    ///
    /// Returns HTTP 400 Bad Request. The String is the reason shown to the caller.
    #[error("{0}")]
    InvalidRequest(String),

    /// The account service answered a balance mutation with status >= 400.
    ///
    /// Status and message are passed through unchanged.
    #[error("{message}")]
    LedgerRejected { status: u16, message: String },

    /// The account service could not be reached or gave no usable answer.
    ///
    /// Returns HTTP 500 with the failure description.
    #[error("{0}")]
    LedgerUnavailable(String),

    /// Unexpected failure raised while mutating a balance.
    ///
    /// Returns HTTP 500 with the underlying message.
    #[error("{0}")]
    Internal(String),

    /// No transaction with the requested `transaction_id`.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Transaction not found")]
    TransactionNotFound,

    /// A status update targeted a transaction that already reached SUCCESS or FAILED.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("Transaction {0} is already finalized")]
    TransactionFinalized(i64),

    /// A transaction was requested by a `transaction_id` that is not a UUID.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid transaction id: {0}")]
    InvalidTransactionId(String),
}

impl AppError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidRequest(_) | AppError::InvalidTransactionId(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::LedgerRejected { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            AppError::TransactionNotFound => StatusCode::NOT_FOUND,
            AppError::TransactionFinalized(_) => StatusCode::CONFLICT,
            AppError::LedgerUnavailable(_) | AppError::Internal(_) | AppError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "unauthorized",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::InvalidTransactionId(_) => "invalid_transaction_id",
            AppError::LedgerRejected { .. } => "ledger_rejected",
            AppError::LedgerUnavailable(_) => "ledger_unavailable",
            AppError::TransactionNotFound => "transaction_not_found",
            AppError::TransactionFinalized(_) => "transaction_finalized",
            AppError::Internal(_) | AppError::Database(_) => "internal_error",
        }
    }
}

/// Failure raised by a `BalanceLedger` implementation instead of an outcome.
///
/// The HTTP account client never produces one (it folds every failure into a
/// `BalanceOutcome`), but other ledger implementations may.
#[derive(Debug, thiserror::Error)]
pub enum LedgerCallError {
    /// Already classified; the orchestrator re-raises it unchanged.
    #[error(transparent)]
    Classified(#[from] AppError),

    /// Anything else; the orchestrator reports it as `AppError::Internal`.
    #[error("{0}")]
    Unexpected(String),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "ledger_rejected",
///     "message": "Insufficient balance"
///   },
///   "status": 400
/// }
/// ```
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            },
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
