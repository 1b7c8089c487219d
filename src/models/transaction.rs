//! Transaction data models and API request/response types.
//!
//! This module defines:
//! - `Transaction`: Database entity representing one deposit, withdrawal or transfer
//! - `TransactionKind` / `TransactionStatus`: the closed vocabularies stored with it
//! - `TransactionRequest`: Request body shared by the three money-movement endpoints
//! - `TransactionResponse`: Projection returned by the listing endpoint

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of money movement a transaction records.
///
/// Fixed when the record is created and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    Transfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdraw => "WITHDRAW",
            TransactionKind::Transfer => "TRANSFER",
        }
    }
}

/// Lifecycle state of a transaction.
///
/// ```text
/// PENDING ──► SUCCESS
///    │
///    └──────► FAILED
/// ```
///
/// SUCCESS and FAILED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Success => "SUCCESS",
            TransactionStatus::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

/// A stored column held a value outside the enum's vocabulary.
#[derive(Debug, thiserror::Error)]
#[error("unknown {field} value: {value}")]
pub struct UnknownVariant {
    field: &'static str,
    value: String,
}

impl FromStr for TransactionKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEPOSIT" => Ok(TransactionKind::Deposit),
            "WITHDRAW" => Ok(TransactionKind::Withdraw),
            "TRANSFER" => Ok(TransactionKind::Transfer),
            other => Err(UnknownVariant {
                field: "transaction_type",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TransactionStatus::Pending),
            "SUCCESS" => Ok(TransactionStatus::Success),
            "FAILED" => Ok(TransactionStatus::Failed),
            other => Err(UnknownVariant {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

// sqlx's `try_from` column attribute goes through `TryFrom<String>`.
impl TryFrom<String> for TransactionKind {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for TransactionStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a transaction record from the database.
///
/// # Database Table
///
/// Maps to the `transactions` table. Each transaction:
/// - Has a store-assigned `id` and a random external `transaction_id`
/// - Always has a source account; has a destination account only for transfers
/// - Stores the amount as an exact decimal (never floats!)
/// - Is written as PENDING before any balance is touched, then moved to
///   SUCCESS or FAILED exactly once
///
/// The record is the permanent audit entry for the attempt, whatever its outcome.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Surrogate key assigned by the store
    pub id: i64,

    /// Externally visible identifier, unique across all transactions
    pub transaction_id: Uuid,

    /// Source account number (the only account for deposit and withdraw)
    pub account_from: String,

    /// Destination account number, set only for transfers
    pub account_to: Option<String>,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,

    #[serde(rename = "type")]
    #[sqlx(try_from = "String")]
    pub kind: TransactionKind,

    #[sqlx(try_from = "String")]
    pub status: TransactionStatus,

    pub created_at: DateTime<Utc>,

    /// Business-effective date; equal to `created_at` for now
    pub transaction_date: DateTime<Utc>,
}

/// A transaction that has not been stored yet.
///
/// Built by the orchestrator from a validated request and handed to the
/// store, which assigns the surrogate `id`.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub transaction_id: Uuid,
    pub account_from: String,
    pub account_to: Option<String>,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub created_at: DateTime<Utc>,
    pub transaction_date: DateTime<Utc>,
}

impl NewTransaction {
    /// Start a PENDING transaction with a fresh `transaction_id`.
    pub fn pending(
        kind: TransactionKind,
        account_from: String,
        account_to: Option<String>,
        amount: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            transaction_id: Uuid::new_v4(),
            account_from,
            account_to,
            amount,
            kind,
            created_at: now,
            transaction_date: now,
        }
    }
}

/// Request to deposit, withdraw or transfer.
///
/// # JSON Example
///
/// ```json
/// {
///   "accountFrom": "1234567890",
///   "accountTo": "0987654321",
///   "amount": 250.75
/// }
/// ```
///
/// Every field is optional here so missing values are reported by the
/// validator with its own messages instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(default)]
    pub account_from: Option<String>,

    /// Only read for transfers
    #[serde(default)]
    pub account_to: Option<String>,

    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub amount: Option<Decimal>,
}

/// Response item returned when listing an account's transactions.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 7,
///   "transactionId": "770e8400-e29b-41d4-a716-446655440002",
///   "accountFrom": "1234567890",
///   "accountTo": null,
///   "amount": 500,
///   "type": "DEPOSIT",
///   "status": "SUCCESS",
///   "createdAt": "2025-12-21T16:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: i64,
    pub transaction_id: Uuid,
    pub account_from: String,
    pub account_to: Option<String>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

/// Convert database Transaction to API TransactionResponse.
///
/// This drops the internal `transaction_date` field.
impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            transaction_id: transaction.transaction_id,
            account_from: transaction.account_from,
            account_to: transaction.account_to,
            amount: transaction.amount,
            kind: transaction.kind,
            status: transaction.status,
            created_at: transaction.created_at,
        }
    }
}
