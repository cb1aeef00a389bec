/// Banking API wire types
///
/// These match the JSON shapes the real backend emits so clients can
/// consume the mock transparently. Timestamps are serialized with
/// microsecond precision and a `Z` suffix, one of the encodings the
/// backend has shipped.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

fn micros_utc<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, true))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Account response from /api/account/{id} and POST /api/transactions
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub user_id: String,
    pub balance: f64,
    #[serde(serialize_with = "micros_utc")]
    pub created_at: DateTime<Utc>,
}

/// Entry in the /api/account/{id}/transactions listing
#[derive(Debug, Clone, Serialize)]
pub struct TransactionResponse {
    pub id: String,
    pub account_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    #[serde(serialize_with = "micros_utc")]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of POST /api/transactions
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
}
