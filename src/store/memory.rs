//! In-process transaction store.
//!
//! Used when no `DATABASE_URL` is configured and by the test suite. Records
//! live only as long as the process.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::transaction::{NewTransaction, Transaction, TransactionStatus},
    store::TransactionStore,
};

#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    // Index is `id - 1`.
    rows: RwLock<Vec<Transaction>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored transaction in insertion order.
    pub async fn all(&self) -> Vec<Transaction> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert(&self, transaction: &NewTransaction) -> Result<Transaction, AppError> {
        let mut rows = self.rows.write().await;

        if rows
            .iter()
            .any(|row| row.transaction_id == transaction.transaction_id)
        {
            return Err(AppError::Internal(format!(
                "duplicate transaction id {}",
                transaction.transaction_id
            )));
        }

        let stored = Transaction {
            id: rows.len() as i64 + 1,
            transaction_id: transaction.transaction_id,
            account_from: transaction.account_from.clone(),
            account_to: transaction.account_to.clone(),
            amount: transaction.amount,
            kind: transaction.kind,
            status: TransactionStatus::Pending,
            created_at: transaction.created_at,
            transaction_date: transaction.transaction_date,
        };
        rows.push(stored.clone());

        Ok(stored)
    }

    async fn update_status(
        &self,
        id: i64,
        status: TransactionStatus,
    ) -> Result<Transaction, AppError> {
        let mut rows = self.rows.write().await;

        let row = usize::try_from(id - 1)
            .ok()
            .and_then(|index| rows.get_mut(index))
            .filter(|row| !row.status.is_terminal())
            .ok_or(AppError::TransactionFinalized(id))?;

        row.status = status;
        Ok(row.clone())
    }

    async fn find_by_account_from(
        &self,
        account_number: &str,
    ) -> Result<Vec<Transaction>, AppError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.account_from == account_number)
            .cloned()
            .collect())
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: Uuid,
    ) -> Result<Option<Transaction>, AppError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|row| row.transaction_id == transaction_id)
            .cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
