//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.
//! They can:
//! - Capture request metadata for handlers
//! - Short-circuit requests (reject unauthenticated callers)

/// Bearer credential capture middleware
pub mod auth;
