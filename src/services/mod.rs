//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They handle validation, balance mutations on the account service and
//! transaction status bookkeeping.

pub mod account_client;
pub mod transaction_service;
pub mod validator;
