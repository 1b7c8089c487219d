//! Precondition checks for incoming transaction requests.

use rust_decimal::Decimal;

use crate::{
    error::AppError,
    models::transaction::{TransactionKind, TransactionRequest},
};

/// Decimal places the `transactions.amount` column keeps (`NUMERIC(19, 4)`).
pub const AMOUNT_SCALE: u32 = 4;

/// Amounts must stay below this; the column holds 15 integer digits.
const AMOUNT_LIMIT: i64 = 1_000_000_000_000_000;

/// Fields of a request that passed validation.
///
/// `account_to` is only kept for transfers.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub account_from: String,
    pub account_to: Option<String>,
    pub amount: Decimal,
}

/// Validate a request for the given kind.
///
/// # Rules (checked in order, first failure wins)
///
/// 1. `accountFrom` is present and not blank
/// 2. `amount` is present and greater than zero
/// 3. `amount` has at most `AMOUNT_SCALE` decimal places and fits the store
/// 4. For transfers, `accountTo` is present and not blank
pub fn validate(
    request: &TransactionRequest,
    kind: TransactionKind,
) -> Result<ValidatedRequest, AppError> {
    let account_from = non_blank(request.account_from.as_deref())
        .ok_or_else(|| AppError::InvalidRequest("AccountFrom is mandatory".to_string()))?;

    let amount = request
        .amount
        .filter(|amount| *amount > Decimal::ZERO)
        .ok_or_else(|| AppError::InvalidRequest("Amount must be greater than 0".to_string()))?;

    // Stored amounts are never rounded, so reject what the column would round.
    let amount = amount.normalize();
    if amount.scale() > AMOUNT_SCALE {
        return Err(AppError::InvalidRequest(format!(
            "Amount must have at most {} decimal places",
            AMOUNT_SCALE
        )));
    }
    if amount >= Decimal::from(AMOUNT_LIMIT) {
        return Err(AppError::InvalidRequest(format!(
            "Amount must be less than {}",
            AMOUNT_LIMIT
        )));
    }

    let account_to = match kind {
        TransactionKind::Transfer => Some(
            non_blank(request.account_to.as_deref()).ok_or_else(|| {
                AppError::InvalidRequest("AccountTo is mandatory for transfer".to_string())
            })?,
        ),
        TransactionKind::Deposit | TransactionKind::Withdraw => None,
    };

    Ok(ValidatedRequest {
        account_from: account_from.to_string(),
        account_to: account_to.map(str::to_string),
        amount,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(from: Option<&str>, to: Option<&str>, amount: Option<i64>) -> TransactionRequest {
        TransactionRequest {
            account_from: from.map(str::to_string),
            account_to: to.map(str::to_string),
            amount: amount.map(Decimal::from),
        }
    }

    fn message(result: Result<ValidatedRequest, AppError>) -> String {
        match result {
            Err(AppError::InvalidRequest(msg)) => msg,
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn missing_or_blank_account_from_is_rejected_first() {
        assert_eq!(
            message(validate(&request(None, None, None), TransactionKind::Deposit)),
            "AccountFrom is mandatory"
        );
        assert_eq!(
            message(validate(&request(Some("   "), None, Some(10)), TransactionKind::Withdraw)),
            "AccountFrom is mandatory"
        );
    }

    #[test]
    fn amount_must_be_positive() {
        for amount in [None, Some(0), Some(-5)] {
            assert_eq!(
                message(validate(
                    &request(Some("1234567890"), None, amount),
                    TransactionKind::Deposit
                )),
                "Amount must be greater than 0"
            );
        }
    }

    #[test]
    fn amount_is_checked_before_account_to() {
        assert_eq!(
            message(validate(&request(Some("A"), None, Some(0)), TransactionKind::Transfer)),
            "Amount must be greater than 0"
        );
    }

    #[test]
    fn transfer_requires_account_to() {
        assert_eq!(
            message(validate(&request(Some("A"), None, Some(100)), TransactionKind::Transfer)),
            "AccountTo is mandatory for transfer"
        );
        assert_eq!(
            message(validate(&request(Some("A"), Some(""), Some(100)), TransactionKind::Transfer)),
            "AccountTo is mandatory for transfer"
        );
    }

    #[test]
    fn account_to_is_dropped_outside_transfers() {
        let validated = validate(
            &request(Some("1234567890"), Some("B"), Some(500)),
            TransactionKind::Deposit,
        )
        .unwrap();
        assert_eq!(
            validated,
            ValidatedRequest {
                account_from: "1234567890".to_string(),
                account_to: None,
                amount: Decimal::from(500),
            }
        );

        let transfer =
            validate(&request(Some("A"), Some("B"), Some(100)), TransactionKind::Transfer).unwrap();
        assert_eq!(transfer.account_to.as_deref(), Some("B"));
    }

    fn amount_message(amount: &str) -> String {
        message(validate(
            &TransactionRequest {
                account_from: Some("A".to_string()),
                account_to: None,
                amount: Some(amount.parse().unwrap()),
            },
            TransactionKind::Deposit,
        ))
    }

    #[test]
    fn amounts_finer_than_the_store_are_rejected() {
        assert_eq!(
            amount_message("0.00001"),
            "Amount must have at most 4 decimal places"
        );
        assert_eq!(
            amount_message("0.12345"),
            "Amount must have at most 4 decimal places"
        );
    }

    #[test]
    fn amounts_too_large_for_the_store_are_rejected() {
        assert_eq!(
            amount_message("1000000000000000"),
            "Amount must be less than 1000000000000000"
        );
    }

    #[test]
    fn trailing_zeros_do_not_count_towards_scale() {
        let validated = validate(
            &TransactionRequest {
                account_from: Some("A".to_string()),
                account_to: None,
                amount: Some("999999999999999.99990000".parse().unwrap()),
            },
            TransactionKind::Deposit,
        )
        .unwrap();
        assert_eq!(validated.amount, "999999999999999.9999".parse().unwrap());
        assert_eq!(validated.amount.scale(), 4);
    }

    #[test]
    fn fractional_amounts_are_accepted() {
        let validated = validate(
            &TransactionRequest {
                account_from: Some("A".to_string()),
                account_to: None,
                amount: Some(Decimal::new(1, 2)),
            },
            TransactionKind::Withdraw,
        )
        .unwrap();
        assert_eq!(validated.amount, Decimal::new(1, 2));
    }
}
