//! Domain model decoded from the banking API.
//!
//! Wire payloads use snake_case field names and have drifted across backend
//! versions in two ways this module tolerates at the decode boundary:
//! timestamps arrive in several RFC3339 flavors, and identifiers arrive as
//! either JSON strings or integers (legacy backend). Both are normalized
//! here so the rest of the client sees one shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's account. Balance only changes via a successful transaction
/// round trip; a fresh fetch strictly replaces the previous value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(with = "string_or_int")]
    pub id: String,
    #[serde(rename = "user_id", with = "string_or_int")]
    pub owner_id: String,
    pub balance: f64,
    #[serde(rename = "created_at", with = "flexible_timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "DEPOSIT")]
    Deposit,
    #[serde(rename = "WITHDRAWAL")]
    Withdrawal,
    #[serde(rename = "TRANSFER_IN")]
    TransferIn,
    #[serde(rename = "TRANSFER_OUT")]
    TransferOut,
}

/// A single ledger operation, immutable once decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(with = "string_or_int")]
    pub id: String,
    #[serde(rename = "account_id", with = "string_or_int")]
    pub account_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    #[serde(rename = "created_at", with = "flexible_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parse a wire timestamp, trying each known backend encoding in order:
/// micro/milli/second precision with a numeric offset, then the same three
/// with a literal `Z` suffix.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    const OFFSET_FORMATS: [&str; 3] = [
        "%Y-%m-%dT%H:%M:%S%.6f%z",
        "%Y-%m-%dT%H:%M:%S%.3f%z",
        "%Y-%m-%dT%H:%M:%S%z",
    ];
    const UTC_FORMATS: [&str; 3] = [
        "%Y-%m-%dT%H:%M:%S%.6fZ",
        "%Y-%m-%dT%H:%M:%S%.3fZ",
        "%Y-%m-%dT%H:%M:%SZ",
    ];

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in UTC_FORMATS {
        if let Ok(parsed) = chrono::NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    None
}

mod flexible_timestamp {
    use super::parse_timestamp;
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("unrecognized timestamp format: {raw:?}")))
    }
}

mod string_or_int {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    pub fn serialize<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s,
            Raw::Number(n) => n.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_fallback_chain_agrees_on_instant() {
        let plain = parse_timestamp("2023-01-01T12:00:00Z").unwrap();
        let micros = parse_timestamp("2023-01-01T12:00:00.123456+0000").unwrap();
        assert_eq!(plain.timestamp(), micros.timestamp());
        assert_eq!(micros.timestamp_subsec_micros(), 123_456);

        assert!(parse_timestamp("2023-01-01T12:00:00.123+0000").is_some());
        assert!(parse_timestamp("2023-01-01T12:00:00+0100").is_some());
        assert!(parse_timestamp("2023-01-01T12:00:00.123456Z").is_some());
        assert!(parse_timestamp("01/01/2023 12:00").is_none());
    }

    #[test]
    fn test_offset_is_applied() {
        let utc = parse_timestamp("2023-01-01T12:00:00Z").unwrap();
        let cet = parse_timestamp("2023-01-01T13:00:00+0100").unwrap();
        assert_eq!(utc, cet);
    }

    #[test]
    fn test_account_decodes_with_snake_case_fields() {
        let body = r#"{
            "id": "de305d54-75b4-431b-adb2-eb6b9e546014",
            "user_id": "test_user",
            "balance": 1000.0,
            "created_at": "2023-01-01T12:00:00Z"
        }"#;
        let account: Account = serde_json::from_str(body).unwrap();
        assert_eq!(account.owner_id, "test_user");
        assert_eq!(account.balance, 1000.0);
    }

    #[test]
    fn test_legacy_integer_ids_normalize_to_strings() {
        let body = r#"{
            "id": 7,
            "account_id": 42,
            "type": "DEPOSIT",
            "amount": 250.0,
            "created_at": "2023-06-15T08:30:00.000+0000"
        }"#;
        let tx: Transaction = serde_json::from_str(body).unwrap();
        assert_eq!(tx.id, "7");
        assert_eq!(tx.account_id, "42");
        assert_eq!(tx.kind, TransactionKind::Deposit);
        assert_eq!(tx.description, None);
    }

    #[test]
    fn test_bad_timestamp_is_a_decode_error() {
        let body = r#"{
            "id": "a",
            "user_id": "u",
            "balance": 1.0,
            "created_at": "yesterday"
        }"#;
        assert!(serde_json::from_str::<Account>(body).is_err());
    }
}
