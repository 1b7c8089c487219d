//! Transaction Service - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Open the transaction store (PostgreSQL with migrations, or in-memory)
//! 3. Create the account service client
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use transaction_service::{
    AppState, build_router,
    config::Config,
    db,
    services::{account_client::AccountClient, transaction_service::TransactionService},
    store::{InMemoryTransactionStore, PgTransactionStore, TransactionStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let store: Arc<dyn TransactionStore> = match &config.database_url {
        Some(database_url) => Arc::new(PgTransactionStore::new(db::connect(database_url).await?)),
        None => {
            tracing::warn!("DATABASE_URL not set, transactions are kept in memory only");
            Arc::new(InMemoryTransactionStore::new())
        }
    };

    let ledger = Arc::new(AccountClient::new(
        &config.account_service_url,
        config.account_service_timeout(),
    )?);
    tracing::info!(
        "Account service client targets {}",
        ledger.update_balance_url()
    );

    let app = build_router(AppState::new(TransactionService::new(store, ledger)));

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
