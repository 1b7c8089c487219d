//! PostgreSQL-backed transaction store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::transaction::{NewTransaction, Transaction, TransactionStatus},
    store::TransactionStore,
};

/// Column list shared by every query, aliased to `Transaction` field names.
const COLUMNS: &str = r#"
    id,
    transaction_id,
    source_account_number AS account_from,
    destination_account_number AS account_to,
    amount,
    transaction_type AS kind,
    status,
    created_at,
    transaction_date
"#;

#[derive(Debug, Clone)]
pub struct PgTransactionStore {
    pool: DbPool,
}

impl PgTransactionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn insert(&self, transaction: &NewTransaction) -> Result<Transaction, AppError> {
        let query = format!(
            r#"
            INSERT INTO transactions (
                transaction_id,
                source_account_number,
                destination_account_number,
                amount,
                transaction_type,
                status,
                created_at,
                transaction_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        );

        let stored = sqlx::query_as::<_, Transaction>(&query)
            .bind(transaction.transaction_id)
            .bind(&transaction.account_from)
            .bind(&transaction.account_to)
            .bind(transaction.amount)
            .bind(transaction.kind.as_str())
            .bind(TransactionStatus::Pending.as_str())
            .bind(transaction.created_at)
            .bind(transaction.transaction_date)
            .fetch_one(&self.pool)
            .await?;

        Ok(stored)
    }

    async fn update_status(
        &self,
        id: i64,
        status: TransactionStatus,
    ) -> Result<Transaction, AppError> {
        // Only PENDING rows move; a terminal row matches nothing.
        let query = format!(
            r#"
            UPDATE transactions
            SET status = $2
            WHERE id = $1 AND status = 'PENDING'
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, Transaction>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::TransactionFinalized(id))
    }

    async fn find_by_account_from(
        &self,
        account_number: &str,
    ) -> Result<Vec<Transaction>, AppError> {
        let query =
            format!("SELECT {COLUMNS} FROM transactions WHERE source_account_number = $1 ORDER BY id");

        let transactions = sqlx::query_as::<_, Transaction>(&query)
            .bind(account_number)
            .fetch_all(&self.pool)
            .await?;

        Ok(transactions)
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: Uuid,
    ) -> Result<Option<Transaction>, AppError> {
        let query = format!("SELECT {COLUMNS} FROM transactions WHERE transaction_id = $1");

        let transaction = sqlx::query_as::<_, Transaction>(&query)
            .bind(transaction_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(transaction)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
