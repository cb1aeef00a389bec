use std::sync::Arc;

use crate::client::BankingClient;
use crate::models::{Account, Transaction};
use crate::token::TokenStore;

/// Per-login session state: the current account snapshot and transaction
/// history. Each refresh strictly replaces the previous values, never
/// merges them.
pub struct Session {
    client: Arc<dyn BankingClient>,
    tokens: Arc<dyn TokenStore>,
    pub account: Option<Account>,
    pub transactions: Vec<Transaction>,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

impl Session {
    pub fn new(client: Arc<dyn BankingClient>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            tokens,
            account: None,
            transactions: Vec::new(),
            is_loading: false,
            last_error: None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.tokens.get().is_some()
    }

    /// Authenticate and persist the issued bearer token. Returns whether
    /// login succeeded; on failure the error message is recorded.
    pub async fn log_in(&mut self, username: &str, password: &str) -> bool {
        self.is_loading = true;
        self.last_error = None;

        let result = self.client.login(username, password).await;
        self.is_loading = false;

        match result {
            Ok(response) => {
                self.tokens.save(&response.token);
                log::info!("logged in as {username}");
                true
            }
            Err(e) => {
                log::warn!("login failed: {e}");
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    /// Drop the token and all fetched state.
    pub fn log_out(&mut self) {
        self.tokens.delete();
        self.account = None;
        self.transactions.clear();
        self.last_error = None;
    }

    /// Fetch the account snapshot and transaction history concurrently.
    ///
    /// The two fetches race; each result lands in its own slot, so one
    /// completing (or failing) first cannot corrupt the other. Transactions
    /// are ordered newest-first here, the source guarantees no ordering.
    pub async fn refresh(&mut self, account_id: &str) {
        self.is_loading = true;
        self.last_error = None;

        let (account, transactions) = tokio::join!(
            self.client.fetch_account(account_id),
            self.client.fetch_transactions(account_id),
        );
        self.is_loading = false;

        match account {
            Ok(account) => self.account = Some(account),
            Err(e) => {
                log::warn!("account fetch failed: {e}");
                self.last_error = Some(e.to_string());
            }
        }

        match transactions {
            Ok(mut transactions) => {
                transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                self.transactions = transactions;
            }
            Err(e) => {
                log::warn!("transaction fetch failed: {e}");
                self.last_error = Some(e.to_string());
            }
        }
    }
}
