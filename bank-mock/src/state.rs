/// In-memory bank state
///
/// One seeded demo account plus its transaction history, guarded by a
/// mutex. `reset` restores the seed, mirroring the real backend's
/// test-environment reset endpoint.

use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::types::{AccountResponse, TransactionRequest, TransactionResponse};

/// Credentials and identifiers seeded by the real backend's fixtures.
pub const DEMO_USERNAME: &str = "test_user";
pub const DEMO_PASSWORD: &str = "password123";
pub const DEMO_ACCOUNT_ID: &str = "de305d54-75b4-431b-adb2-eb6b9e546014";
pub const DEMO_TOKEN: &str = "mock-jwt-token";

/// Account id that simulates a backend fault (HTTP 500) when fetched.
pub const FAULT_ACCOUNT_ID: &str = "error-500";

struct Inner {
    account: AccountResponse,
    transactions: Vec<TransactionResponse>,
    next_transaction_id: u64,
}

pub struct BankState {
    inner: Mutex<Inner>,
}

impl Default for BankState {
    fn default() -> Self {
        Self::new()
    }
}

impl BankState {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Self::seed()),
        }
    }

    fn seed() -> Inner {
        let opened: DateTime<Utc> = Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap();
        let account = AccountResponse {
            id: DEMO_ACCOUNT_ID.to_string(),
            user_id: DEMO_USERNAME.to_string(),
            balance: 1000.0,
            created_at: opened,
        };

        let transactions = vec![
            TransactionResponse {
                id: "1".to_string(),
                account_id: DEMO_ACCOUNT_ID.to_string(),
                kind: "DEPOSIT".to_string(),
                amount: 1200.0,
                created_at: opened + Duration::days(1),
                description: Some("Opening deposit".to_string()),
            },
            TransactionResponse {
                id: "2".to_string(),
                account_id: DEMO_ACCOUNT_ID.to_string(),
                kind: "WITHDRAWAL".to_string(),
                amount: 350.0,
                created_at: opened + Duration::days(3),
                description: None,
            },
            TransactionResponse {
                id: "3".to_string(),
                account_id: DEMO_ACCOUNT_ID.to_string(),
                kind: "TRANSFER_IN".to_string(),
                amount: 150.0,
                created_at: opened + Duration::days(2),
                description: Some("Incoming transfer".to_string()),
            },
        ];

        Inner {
            account,
            transactions,
            next_transaction_id: 4,
        }
    }

    /// Restore the seeded fixtures.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = Self::seed();
    }

    /// Validate credentials and issue the bearer token.
    pub fn login(&self, username: &str, password: &str) -> Option<String> {
        if username == DEMO_USERNAME && password == DEMO_PASSWORD {
            Some(DEMO_TOKEN.to_string())
        } else {
            None
        }
    }

    pub fn is_authorized(&self, bearer: Option<&str>) -> bool {
        bearer == Some(DEMO_TOKEN)
    }

    /// Look up the account by account id or owning user id.
    pub fn account(&self, id: &str) -> Option<AccountResponse> {
        let inner = self.inner.lock().unwrap();
        if inner.account.id == id || inner.account.user_id == id {
            Some(inner.account.clone())
        } else {
            None
        }
    }

    pub fn transactions(&self, id: &str) -> Option<Vec<TransactionResponse>> {
        let inner = self.inner.lock().unwrap();
        if inner.account.id == id || inner.account.user_id == id {
            Some(inner.transactions.clone())
        } else {
            None
        }
    }

    /// Apply a transaction: adjust the balance, record the entry and return
    /// the updated account snapshot. Fails on unknown accounts and on
    /// withdrawals exceeding the balance.
    pub fn apply_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<AccountResponse, String> {
        let mut inner = self.inner.lock().unwrap();
        if inner.account.id != request.user_id && inner.account.user_id != request.user_id {
            return Err("account not found".to_string());
        }

        let delta = match request.kind.as_str() {
            "DEPOSIT" | "TRANSFER_IN" => request.amount,
            "WITHDRAWAL" | "TRANSFER_OUT" => -request.amount,
            other => return Err(format!("unknown transaction type: {other}")),
        };

        if inner.account.balance + delta < 0.0 {
            return Err("insufficient funds".to_string());
        }
        inner.account.balance += delta;

        let id = inner.next_transaction_id;
        inner.next_transaction_id += 1;
        let account_id = inner.account.id.clone();
        inner.transactions.push(TransactionResponse {
            id: id.to_string(),
            account_id,
            kind: request.kind.clone(),
            amount: request.amount,
            created_at: Utc::now(),
            description: None,
        });

        Ok(inner.account.clone())
    }
}
