use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

use crate::api::types::{LoginRequest, LoginResponse, TransactionRequest};
use crate::api::RequestPipeline;
use crate::error::ApiError;
use crate::models::{Account, Transaction, TransactionKind};
use crate::token::TokenStore;

/// Typed facade over the request pipeline. One fresh round trip per call;
/// retry policy belongs to the caller. Test doubles implement this trait
/// in place of the HTTP client.
#[async_trait]
pub trait BankingClient: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;

    async fn fetch_account(&self, account_id: &str) -> Result<Account, ApiError>;

    async fn fetch_transactions(&self, account_id: &str) -> Result<Vec<Transaction>, ApiError>;

    /// Submit a transaction and return the post-transaction account
    /// snapshot (balance adjusted server-side).
    async fn submit_transaction(
        &self,
        account_id: &str,
        kind: TransactionKind,
        amount: f64,
    ) -> Result<Account, ApiError>;
}

/// Production implementation speaking to the real backend.
pub struct HttpBankingClient {
    pipeline: RequestPipeline,
}

impl HttpBankingClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        Ok(Self {
            pipeline: RequestPipeline::new(base_url, tokens)?,
        })
    }
}

#[async_trait]
impl BankingClient for HttpBankingClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = serde_json::to_value(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        self.pipeline
            .execute(Method::POST, "/api/login", Some(body), false)
            .await
    }

    async fn fetch_account(&self, account_id: &str) -> Result<Account, ApiError> {
        self.pipeline
            .execute(Method::GET, &format!("/api/account/{account_id}"), None, true)
            .await
    }

    async fn fetch_transactions(&self, account_id: &str) -> Result<Vec<Transaction>, ApiError> {
        self.pipeline
            .execute(
                Method::GET,
                &format!("/api/account/{account_id}/transactions"),
                None,
                true,
            )
            .await
    }

    async fn submit_transaction(
        &self,
        account_id: &str,
        kind: TransactionKind,
        amount: f64,
    ) -> Result<Account, ApiError> {
        let body = serde_json::to_value(TransactionRequest {
            user_id: account_id.to_string(),
            kind,
            amount,
        })
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        self.pipeline
            .execute(Method::POST, "/api/transactions", Some(body), true)
            .await
    }
}
