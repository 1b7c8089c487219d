//! Balance mutation types exchanged with the account service.
//!
//! One balance mutation ("leg") adjusts a single account. Deposits and
//! withdrawals are one leg each; a transfer is a WITHDRAW leg on the source
//! followed by a DEPOSIT leg on the destination.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::transaction::TransactionKind;

/// Direction of a single balance mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LegKind {
    Deposit,
    Withdraw,
}

impl From<LegKind> for TransactionKind {
    fn from(leg: LegKind) -> Self {
        match leg {
            LegKind::Deposit => TransactionKind::Deposit,
            LegKind::Withdraw => TransactionKind::Withdraw,
        }
    }
}

/// Body sent to `PUT /api/accounts/update-balance`.
///
/// ```json
/// { "accountNumber": "1234567890", "amount": 500.25, "type": "DEPOSIT" }
/// ```
///
/// `amount` is written as a JSON number with every digit of the decimal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBalanceRequest {
    pub account_number: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: LegKind,
}

/// Who produced a `BalanceOutcome`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeSource {
    /// The account service answered with this status.
    AccountService,
    /// The call never got a usable answer (connection, timeout, unreadable
    /// or malformed body); the client reports it as status 500.
    Transport,
}

/// Normalized result of one balance mutation call.
///
/// `status < 400` means the ledger applied the mutation. Anything else is a
/// rejection (or a transport failure reported as 500) and `message` holds
/// the reason to surface to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceOutcome {
    pub status: u16,
    pub message: String,
    pub source: OutcomeSource,
}

impl BalanceOutcome {
    pub const SUCCESS_MESSAGE: &'static str = "Balance updated successfully";

    pub fn success(status: u16) -> Self {
        Self {
            status,
            message: Self::SUCCESS_MESSAGE.to_string(),
            source: OutcomeSource::AccountService,
        }
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            source: OutcomeSource::AccountService,
        }
    }

    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self {
            status: 500,
            message: message.into(),
            source: OutcomeSource::Transport,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_success_boundary_is_400() {
        assert!(BalanceOutcome::success(200).is_success());
        assert!(BalanceOutcome::rejected(399, "redirect").is_success());
        assert!(!BalanceOutcome::rejected(400, "Insufficient balance").is_success());
        assert!(!BalanceOutcome::transport_failure("connection refused").is_success());
    }

    #[test]
    fn transport_failures_are_500_from_the_client() {
        let outcome = BalanceOutcome::transport_failure("operation timed out");
        assert_eq!(outcome.status, 500);
        assert_eq!(outcome.source, OutcomeSource::Transport);
        assert_eq!(
            BalanceOutcome::rejected(500, "boom").source,
            OutcomeSource::AccountService
        );
    }

    #[test]
    fn leg_kinds_map_onto_transaction_kinds() {
        assert_eq!(TransactionKind::from(LegKind::Deposit), TransactionKind::Deposit);
        assert_eq!(TransactionKind::from(LegKind::Withdraw), TransactionKind::Withdraw);
    }

    #[test]
    fn update_request_uses_account_service_field_names() {
        let body = serde_json::to_string(&UpdateBalanceRequest {
            account_number: "1234567890".to_string(),
            amount: Decimal::from(1500),
            kind: LegKind::Withdraw,
        })
        .unwrap();

        assert_eq!(
            body,
            r#"{"accountNumber":"1234567890","amount":1500,"type":"WITHDRAW"}"#
        );
    }

    #[test]
    fn update_request_amount_is_exact() {
        for amount in ["1234567890123.4567", "12345678901234567.89", "0.0001"] {
            let body = serde_json::to_string(&UpdateBalanceRequest {
                account_number: "A".to_string(),
                amount: amount.parse().unwrap(),
                kind: LegKind::Deposit,
            })
            .unwrap();

            assert_eq!(
                body,
                format!(r#"{{"accountNumber":"A","amount":{},"type":"DEPOSIT"}}"#, amount)
            );
        }
    }
}
