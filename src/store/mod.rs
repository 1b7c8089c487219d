//! Durable record store for transactions.
//!
//! Records are appended as PENDING and updated once to a terminal status.
//! Nothing is ever deleted.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::transaction::{NewTransaction, Transaction, TransactionStatus},
};

pub use memory::InMemoryTransactionStore;
pub use postgres::PgTransactionStore;

#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Persist a new transaction in PENDING state and return the stored record.
    async fn insert(&self, transaction: &NewTransaction) -> Result<Transaction, AppError>;

    /// Move a PENDING transaction to `status`.
    ///
    /// Fails with `AppError::TransactionFinalized` if the record already
    /// reached a terminal status.
    async fn update_status(
        &self,
        id: i64,
        status: TransactionStatus,
    ) -> Result<Transaction, AppError>;

    /// All transactions whose source account is `account_number`, in insertion order.
    async fn find_by_account_from(&self, account_number: &str)
    -> Result<Vec<Transaction>, AppError>;

    async fn find_by_transaction_id(
        &self,
        transaction_id: Uuid,
    ) -> Result<Option<Transaction>, AppError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
