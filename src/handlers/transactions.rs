//! Transaction HTTP handlers.
//!
//! This module implements transaction-related API endpoints:
//! - POST /api/transaction/deposit - Add money to an account
//! - POST /api/transaction/withdraw - Remove money from an account
//! - POST /api/transaction/transfer - Move money between accounts
//! - GET /api/transaction/{account_number} - List an account's outgoing transactions
//! - GET /api/transaction/id/{transaction_id} - Get one transaction

use crate::{
    AppState,
    error::AppError,
    models::{
        credential::Credential,
        transaction::{Transaction, TransactionRequest, TransactionResponse},
    },
};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use uuid::Uuid;

/// Deposit into an account.
///
/// # Request Body
///
/// ```json
/// {
///   "accountFrom": "1234567890",
///   "amount": 500
/// }
/// ```
///
/// # Response (200)
///
/// ```json
/// {
///   "id": 1,
///   "transactionId": "770e8400-...",
///   "accountFrom": "1234567890",
///   "accountTo": null,
///   "amount": 500.0,
///   "type": "DEPOSIT",
///   "status": "SUCCESS",
///   "createdAt": "2025-12-21T16:00:00Z",
///   "transactionDate": "2025-12-21T16:00:00Z"
/// }
/// ```
pub async fn deposit(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<Transaction>, AppError> {
    let transaction = state.transactions.deposit(request, &credential).await?;
    Ok(Json(transaction))
}

/// Withdraw from an account.
///
/// # Validation
///
/// - `accountFrom` and a positive `amount` are required
/// - Balance sufficiency is decided by the account service
pub async fn withdraw(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<Transaction>, AppError> {
    let transaction = state.transactions.withdraw(request, &credential).await?;
    Ok(Json(transaction))
}

/// Transfer money between accounts.
///
/// # Atomicity
///
/// Not atomic: the source is debited first, then the destination is
/// credited. If the credit fails the transaction is FAILED and the debit
/// stands.
pub async fn transfer(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<Transaction>, AppError> {
    let transaction = state.transactions.transfer(request, &credential).await?;
    Ok(Json(transaction))
}

/// List transactions whose source is `account_number`.
///
/// Returns an empty array for accounts without transactions.
pub async fn list_transactions(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<Json<Vec<TransactionResponse>>, AppError> {
    let transactions = state.transactions.list_transactions(&account_number).await?;
    Ok(Json(transactions))
}

/// Get transaction by its external id.
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<Transaction>, AppError> {
    let transaction_id = parse_transaction_id(&transaction_id)?;
    let transaction = state.transactions.get_transaction(transaction_id).await?;
    Ok(Json(transaction))
}

/// Parse a path segment into a transaction id.
fn parse_transaction_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidTransactionId(raw.to_string()))
}
