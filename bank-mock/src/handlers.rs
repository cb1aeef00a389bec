/// Axum HTTP handlers for the banking API endpoints

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::state::{BankState, FAULT_ACCOUNT_ID};
use crate::types::{
    AccountResponse, LoginRequest, LoginResponse, TransactionRequest, TransactionResponse,
};

type HandlerError = (StatusCode, String);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn require_auth(state: &BankState, headers: &HeaderMap) -> Result<(), HandlerError> {
    if state.is_authorized(bearer_token(headers)) {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()))
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn login_handler(
    State(state): State<Arc<BankState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HandlerError> {
    match state.login(&req.username, &req.password) {
        Some(token) => Ok(Json(LoginResponse { token })),
        None => {
            log::info!("rejected login for {}", req.username);
            Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()))
        }
    }
}

pub async fn get_account_handler(
    State(state): State<Arc<BankState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<AccountResponse>, HandlerError> {
    require_auth(&state, &headers)?;

    // Simulated backend fault, lets clients exercise their 5xx path.
    if id == FAULT_ACCOUNT_ID {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        ));
    }

    state
        .account(&id)
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Account not found".to_string()))
}

pub async fn get_transactions_handler(
    State(state): State<Arc<BankState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<TransactionResponse>>, HandlerError> {
    require_auth(&state, &headers)?;

    state
        .transactions(&id)
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Account not found".to_string()))
}

pub async fn post_transaction_handler(
    State(state): State<Arc<BankState>>,
    headers: HeaderMap,
    Json(req): Json<TransactionRequest>,
) -> Result<Json<AccountResponse>, HandlerError> {
    require_auth(&state, &headers)?;

    if req.amount <= 0.0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "Amount must be greater than zero".to_string(),
        ));
    }

    state
        .apply_transaction(&req)
        .map(Json)
        .map_err(|message| (StatusCode::BAD_REQUEST, message))
}

pub async fn reset_handler(State(state): State<Arc<BankState>>) -> &'static str {
    state.reset();
    "Test environment reset"
}
