//! Data models shared by the handlers, services and store.

/// Balance mutation request and outcome types
pub mod balance;
/// Opaque caller credential
pub mod credential;
/// Transaction entity and API request/response types
pub mod transaction;
