/// Client configuration from environment variables
///
/// Controls the backend origin and the demo identity used by the binary.
/// Defaults target the local demo backend.
use std::env;

/// Fixed demo account seeded by the backend.
pub const DEMO_ACCOUNT_ID: &str = "de305d54-75b4-431b-adb2-eb6b9e546014";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base origin of the banking API
    pub base_url: String,
    /// Account the demo flows operate on
    pub account_id: String,
    /// Demo login credentials
    pub username: String,
    pub password: String,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `DEMOBANK_API_URL`: backend origin (default `http://localhost:8080`)
    /// - `DEMOBANK_ACCOUNT_ID`: account to operate on (default: seeded demo account)
    /// - `DEMOBANK_USERNAME` / `DEMOBANK_PASSWORD`: login credentials
    pub fn from_env() -> Self {
        let base_url = env::var("DEMOBANK_API_URL").unwrap_or_else(|_| {
            log::info!("DEMOBANK_API_URL not set, using http://localhost:8080");
            "http://localhost:8080".to_string()
        });

        let account_id =
            env::var("DEMOBANK_ACCOUNT_ID").unwrap_or_else(|_| DEMO_ACCOUNT_ID.to_string());

        let username = env::var("DEMOBANK_USERNAME").unwrap_or_else(|_| "test_user".to_string());
        let password = env::var("DEMOBANK_PASSWORD").unwrap_or_else(|_| "password123".to_string());

        Self {
            base_url,
            account_id,
            username,
            password,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            account_id: DEMO_ACCOUNT_ID.to_string(),
            username: "test_user".to_string(),
            password: "password123".to_string(),
        }
    }
}
