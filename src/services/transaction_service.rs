//! Transaction service - orchestrates deposits, withdrawals and transfers.
//!
//! This service handles:
//! - Request validation
//! - Recording every attempt as a PENDING transaction before touching balances
//! - Driving one (deposit/withdraw) or two (transfer) balance mutations on the account service
//! - Settling the record as SUCCESS or FAILED from the mutation outcomes
//!
//! # Atomicity
//!
//! Balances live in the account service, so there is no shared database
//! transaction. Each leg is a separate remote call. If a transfer's
//! withdraw leg succeeds and its deposit leg fails, the record is FAILED
//! but the withdrawn funds are NOT returned to the source account. The
//! window between a successful remote call and the local status write is
//! the other place the two services can disagree.

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::{AppError, LedgerCallError},
    models::{
        balance::{LegKind, OutcomeSource},
        credential::Credential,
        transaction::{
            NewTransaction, Transaction, TransactionKind, TransactionRequest,
            TransactionResponse, TransactionStatus,
        },
    },
    services::{account_client::BalanceLedger, validator},
    store::TransactionStore,
};

/// One balance mutation to perform for a transaction.
#[derive(Debug, Clone, Copy)]
struct Leg<'a> {
    account_number: &'a str,
    kind: LegKind,
}

/// Orchestrates money movement between the transaction store and the account service.
///
/// Holds no per-request state; clones of the inner `Arc`s are shared by all requests.
#[derive(Clone)]
pub struct TransactionService {
    store: Arc<dyn TransactionStore>,
    ledger: Arc<dyn BalanceLedger>,
}

impl TransactionService {
    pub fn new(store: Arc<dyn TransactionStore>, ledger: Arc<dyn BalanceLedger>) -> Self {
        Self { store, ledger }
    }

    pub fn store(&self) -> &Arc<dyn TransactionStore> {
        &self.store
    }

    /// Deposit `amount` into `accountFrom`.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: validation failed, nothing stored
    /// - `LedgerRejected`: the account service refused the deposit; record is FAILED
    /// - `LedgerUnavailable`: the account service could not be reached; record is FAILED
    /// - `Internal`: unexpected ledger failure; record is FAILED
    /// - `Database`: the store could not be written
    pub async fn deposit(
        &self,
        request: TransactionRequest,
        credential: &Credential,
    ) -> Result<Transaction, AppError> {
        tracing::info!(
            "Processing deposit for account {}",
            request.account_from.as_deref().unwrap_or_default()
        );
        self.execute(&request, TransactionKind::Deposit, credential)
            .await
    }

    /// Withdraw `amount` from `accountFrom`.
    ///
    /// Balance sufficiency is checked by the account service, which answers
    /// with a rejection when funds are short.
    pub async fn withdraw(
        &self,
        request: TransactionRequest,
        credential: &Credential,
    ) -> Result<Transaction, AppError> {
        tracing::info!(
            "Processing withdrawal for account {}",
            request.account_from.as_deref().unwrap_or_default()
        );
        self.execute(&request, TransactionKind::Withdraw, credential)
            .await
    }

    /// Move `amount` from `accountFrom` to `accountTo`.
    ///
    /// # Process
    ///
    /// 1. WITHDRAW on `accountFrom`; on failure the deposit leg is skipped
    /// 2. DEPOSIT on `accountTo`
    ///
    /// A failure in step 2 leaves the funds withdrawn; no reversal is issued.
    pub async fn transfer(
        &self,
        request: TransactionRequest,
        credential: &Credential,
    ) -> Result<Transaction, AppError> {
        tracing::info!(
            "Processing transfer from {} to {}",
            request.account_from.as_deref().unwrap_or_default(),
            request.account_to.as_deref().unwrap_or_default()
        );
        self.execute(&request, TransactionKind::Transfer, credential)
            .await
    }

    /// List every transaction whose source account is `account_number`.
    ///
    /// Transfers into the account are not included. An unknown account
    /// yields an empty list.
    pub async fn list_transactions(
        &self,
        account_number: &str,
    ) -> Result<Vec<TransactionResponse>, AppError> {
        let transactions = self.store.find_by_account_from(account_number).await?;
        Ok(transactions.into_iter().map(Into::into).collect())
    }

    /// Get transaction by its external id.
    pub async fn get_transaction(&self, transaction_id: Uuid) -> Result<Transaction, AppError> {
        self.store
            .find_by_transaction_id(transaction_id)
            .await?
            .ok_or(AppError::TransactionNotFound)
    }

    async fn execute(
        &self,
        request: &TransactionRequest,
        kind: TransactionKind,
        credential: &Credential,
    ) -> Result<Transaction, AppError> {
        // Nothing is stored for an invalid request.
        let validated = validator::validate(request, kind)?;

        let transaction = self
            .store
            .insert(&NewTransaction::pending(
                kind,
                validated.account_from,
                validated.account_to,
                validated.amount,
            ))
            .await?;

        if let Err(err) = self.settle(&transaction, credential).await {
            self.mark_failed(&transaction, &err).await?;
            return Err(err);
        }

        self.store
            .update_status(transaction.id, TransactionStatus::Success)
            .await
    }

    /// Run every leg of `transaction` in order, stopping at the first failure.
    async fn settle(
        &self,
        transaction: &Transaction,
        credential: &Credential,
    ) -> Result<(), AppError> {
        for leg in legs(transaction)? {
            self.run_leg(leg, transaction.amount, credential)
                .await
                .inspect_err(|err| {
                    tracing::warn!(
                        transaction_id = %transaction.transaction_id,
                        account = leg.account_number,
                        leg = %TransactionKind::from(leg.kind),
                        "{} failed: {}",
                        transaction.kind,
                        err
                    )
                })?;
        }
        Ok(())
    }

    /// Perform one balance mutation and classify its result.
    async fn run_leg(
        &self,
        leg: Leg<'_>,
        amount: Decimal,
        credential: &Credential,
    ) -> Result<(), AppError> {
        match self
            .ledger
            .update_balance(leg.account_number, leg.kind, amount, credential)
            .await
        {
            Ok(outcome) if outcome.is_success() => Ok(()),
            Ok(outcome) if outcome.source == OutcomeSource::Transport => {
                Err(AppError::LedgerUnavailable(outcome.message))
            }
            Ok(outcome) => Err(AppError::LedgerRejected {
                status: outcome.status,
                message: outcome.message,
            }),
            Err(LedgerCallError::Classified(err)) => Err(err),
            Err(LedgerCallError::Unexpected(message)) => {
                tracing::error!("Unexpected balance update failure: {}", message);
                Err(AppError::Internal(message))
            }
        }
    }

    async fn mark_failed(
        &self,
        transaction: &Transaction,
        cause: &AppError,
    ) -> Result<(), AppError> {
        if let Err(e) = self
            .store
            .update_status(transaction.id, TransactionStatus::Failed)
            .await
        {
            tracing::error!(
                transaction_id = %transaction.transaction_id,
                "Could not record FAILED status (cause: {}): {}",
                cause,
                e
            );
            return Err(e);
        }
        Ok(())
    }
}

/// Balance mutations needed to settle `transaction`, in execution order.
fn legs(transaction: &Transaction) -> Result<Vec<Leg<'_>>, AppError> {
    let from = transaction.account_from.as_str();
    let legs = match transaction.kind {
        TransactionKind::Deposit => vec![Leg {
            account_number: from,
            kind: LegKind::Deposit,
        }],
        TransactionKind::Withdraw => vec![Leg {
            account_number: from,
            kind: LegKind::Withdraw,
        }],
        TransactionKind::Transfer => {
            let to = transaction.account_to.as_deref().ok_or_else(|| {
                AppError::Internal(format!(
                    "transfer {} has no destination account",
                    transaction.transaction_id
                ))
            })?;
            vec![
                Leg {
                    account_number: from,
                    kind: LegKind::Withdraw,
                },
                Leg {
                    account_number: to,
                    kind: LegKind::Deposit,
                },
            ]
        }
    };
    Ok(legs)
}
