//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, credential)
//! 2. Delegates to the transaction service
//! 3. Returns HTTP response (JSON, status code)

/// Service health endpoint
pub mod health;
/// Deposit, withdraw, transfer and listing endpoints
pub mod transactions;
