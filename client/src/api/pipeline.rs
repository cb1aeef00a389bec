use std::sync::Arc;

use reqwest::{header, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::token::TokenStore;

/// Turns a logical request (path, method, body, auth flag) into a decoded
/// result or a classified `ApiError`, uniformly for every endpoint.
///
/// Per call the sequence is fixed: token lookup, request build, transport,
/// status classification, decode. The pipeline reads the token store but
/// never writes to it.
pub struct RequestPipeline {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
}

impl RequestPipeline {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            tokens,
        })
    }

    pub async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        requires_auth: bool,
    ) -> Result<T, ApiError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ApiError::InvalidRequest(format!("{path}: {e}")))?;

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(header::CONTENT_TYPE, "application/json");

        if requires_auth {
            // A missing token is not fatal here; the server answers 401.
            match self.tokens.get() {
                Some(token) => request = request.bearer_auth(token),
                None => log::debug!("no stored token, sending {path} unauthenticated"),
            }
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            log::warn!("{method} {path} rejected with 401");
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            log::warn!("{method} {path} failed with status {status}");
            return Err(ApiError::Server(status.as_u16()));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        serde_json::from_str(&raw).map_err(|e| ApiError::Decoding(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MemoryTokenStore;

    #[test]
    fn test_malformed_base_url_is_invalid_request() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let result = RequestPipeline::new("not a url", tokens);
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_a_network_error() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let pipeline = RequestPipeline::new("http://localhost:1", tokens).unwrap();
        let result: Result<serde_json::Value, _> = pipeline
            .execute(Method::GET, "/api/status", None, false)
            .await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
