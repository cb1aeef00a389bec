/// Axum HTTP server setup and routing

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::*;
use crate::state::BankState;

pub fn create_router(state: Arc<BankState>) -> Router {
    // Allow requests from clients/tests regardless of origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Auth
        .route("/api/login", post(login_handler))
        // Account endpoints
        .route("/api/account/:id", get(get_account_handler))
        .route("/api/account/:id/transactions", get(get_transactions_handler))
        // Transactions
        .route("/api/transactions", post(post_transaction_handler))
        // Test helper endpoints
        .route("/reset", post(reset_handler))
        // Shared state
        .with_state(state)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` (supports port 0 for an ephemeral port) and serve in a
/// background task. Returns the bound address, for tests that embed the
/// mock in-process.
pub async fn serve(
    state: Arc<BankState>,
    addr: &str,
) -> anyhow::Result<(SocketAddr, JoinHandle<()>)> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    log::info!("🏦 Bank mock server listening on http://{}", local_addr);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            log::error!("bank mock server stopped: {}", e);
        }
    });

    Ok((local_addr, handle))
}

pub async fn run_server(state: Arc<BankState>, host: String, port: u16) -> anyhow::Result<()> {
    let (_, handle) = serve(state, &format!("{}:{}", host, port)).await?;
    handle.await?;
    Ok(())
}
