//! Transaction Service
//!
//! Records deposits, withdrawals and transfers and applies them by calling
//! the account service, which owns the balances.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx, or an in-memory store for development
//! - **Balances**: account service, reached over HTTP with reqwest
//! - **Authentication**: the caller's bearer credential is forwarded as-is
//! - **Format**: JSON requests/responses

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::services::transaction_service::TransactionService;

/// State shared with every handler.
#[derive(Clone)]
pub struct AppState {
    pub transactions: TransactionService,
}

impl AppState {
    pub fn new(transactions: TransactionService) -> Self {
        Self { transactions }
    }
}

/// Build the HTTP router with routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Every transaction route needs a credential to forward
    let authenticated_routes = Router::new()
        .route(
            "/api/transaction/deposit",
            post(handlers::transactions::deposit),
        )
        .route(
            "/api/transaction/withdraw",
            post(handlers::transactions::withdraw),
        )
        .route(
            "/api/transaction/transfer",
            post(handlers::transactions::transfer),
        )
        .route(
            "/api/transaction/id/{transaction_id}",
            get(handlers::transactions::get_transaction),
        )
        .route(
            "/api/transaction/{account_number}",
            get(handlers::transactions::list_transactions),
        )
        .route_layer(axum_middleware::from_fn(
            middleware::auth::require_credential,
        ));

    Router::new()
        // Public routes (no credential required)
        .route("/health", get(handlers::health::health_check))
        .merge(authenticated_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
