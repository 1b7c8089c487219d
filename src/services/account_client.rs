//! Client for the account service's balance mutation endpoint.
//!
//! This module handles:
//! - Sending one balance mutation (`PUT /api/accounts/update-balance`)
//! - Forwarding the caller's credential unchanged
//! - Folding every response or transport failure into a `BalanceOutcome`
//! - Sending amounts as exact JSON numbers

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use rust_decimal::Decimal;
use url::Url;

use crate::{
    error::LedgerCallError,
    models::{
        balance::{BalanceOutcome, LegKind, UpdateBalanceRequest},
        credential::Credential,
    },
};

const UPDATE_BALANCE_PATH: &str = "/api/accounts/update-balance";

/// Something that can adjust one account's balance.
///
/// A returned `BalanceOutcome` with status >= 400 is a rejection the ledger
/// chose to report; `Err` is reserved for failures raised by deeper layers.
#[async_trait]
pub trait BalanceLedger: Send + Sync {
    async fn update_balance(
        &self,
        account_number: &str,
        kind: LegKind,
        amount: Decimal,
        credential: &Credential,
    ) -> Result<BalanceOutcome, LedgerCallError>;
}

/// HTTP client for the account service.
#[derive(Debug, Clone)]
pub struct AccountClient {
    client: Client,
    update_balance_url: Url,
}

impl AccountClient {
    /// Create a client for the account service at `base_url`.
    ///
    /// # Timeout
    ///
    /// Every request is bounded by `timeout`; an expired request is reported
    /// as a 500 outcome like any other transport failure.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let update_balance_url = Url::parse(&format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            UPDATE_BALANCE_PATH
        ))
        .with_context(|| format!("invalid account service url: {}", base_url))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build account service HTTP client")?;

        Ok(Self {
            client,
            update_balance_url,
        })
    }

    pub fn update_balance_url(&self) -> &Url {
        &self.update_balance_url
    }

    async fn send(&self, request: &UpdateBalanceRequest, credential: &Credential) -> BalanceOutcome {
        let response = match self
            .client
            .put(self.update_balance_url.clone())
            .header(header::AUTHORIZATION, credential.header_value().clone())
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Balance update request failed: {}", e);
                return BalanceOutcome::transport_failure(e.to_string());
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Failed to read balance update response: {}", e);
                return BalanceOutcome::transport_failure(e.to_string());
            }
        };

        if status.as_u16() < 400 {
            if !body.trim().is_empty() {
                if let Err(e) = serde_json::from_str::<serde_json::Value>(&body) {
                    return BalanceOutcome::transport_failure(format!(
                        "Malformed response from account service: {}",
                        e
                    ));
                }
            }
            return BalanceOutcome::success(status.as_u16());
        }

        BalanceOutcome::rejected(status.as_u16(), rejection_message(status, &body))
    }
}

#[async_trait]
impl BalanceLedger for AccountClient {
    async fn update_balance(
        &self,
        account_number: &str,
        kind: LegKind,
        amount: Decimal,
        credential: &Credential,
    ) -> Result<BalanceOutcome, LedgerCallError> {
        let request = UpdateBalanceRequest {
            account_number: account_number.to_string(),
            amount,
            kind,
        };
        Ok(self.send(&request, credential).await)
    }
}

/// Extract the reason from an error response body.
///
/// The account service answers `{"error": "Insufficient balance", ...}`;
/// `{"error": {"message": ...}}` is accepted too. Anything else falls back
/// to the status's reason phrase.
fn rejection_message(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| match value.get("error") {
            Some(serde_json::Value::String(message)) => Some(message.clone()),
            Some(serde_json::Value::Object(error)) => error
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        });

    from_body.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_balance_url_is_joined_to_base() {
        let client = AccountClient::new("http://localhost:8081/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.update_balance_url().as_str(),
            "http://localhost:8081/api/accounts/update-balance"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(AccountClient::new("not a url", Duration::from_secs(5)).is_err());
    }

    #[test]
    fn test_rejection_message_prefers_error_field() {
        assert_eq!(
            rejection_message(
                StatusCode::BAD_REQUEST,
                r#"{"error":"Insufficient balance","status":400}"#
            ),
            "Insufficient balance"
        );
        assert_eq!(
            rejection_message(
                StatusCode::NOT_FOUND,
                r#"{"error":{"code":"account_not_found","message":"Account not found"}}"#
            ),
            "Account not found"
        );
    }

    #[test]
    fn test_rejection_message_falls_back_to_reason_phrase() {
        assert_eq!(
            rejection_message(StatusCode::NOT_FOUND, "<html>nope</html>"),
            "Not Found"
        );
        assert_eq!(
            rejection_message(StatusCode::BAD_REQUEST, r#"{"message":"x"}"#),
            "Bad Request"
        );
    }
}
