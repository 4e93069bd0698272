//! Shared HTTP plumbing for the embedding providers
//!
//! One request path and one status-to-error mapping for every backend.

use super::unified_provider::ProviderError;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::debug;

/// Build the HTTP client for one provider slot
pub(crate) fn build_client(
    provider: &'static str,
    timeout: Duration,
) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .build()
        .map_err(|e| ProviderError::other(provider, format!("Failed to build client: {}", e)))
}

/// Join a base URL and a path without doubling slashes
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// POST a JSON body and decode a JSON response
pub(crate) async fn post_json<T: DeserializeOwned>(
    provider: &'static str,
    client: &Client,
    url: &str,
    api_key: Option<&str>,
    body: &Value,
) -> Result<T, ProviderError> {
    let mut request = client.post(url).json(body);
    if let Some(key) = api_key {
        request = request.bearer_auth(key);
    }

    let response = request
        .send()
        .await
        .map_err(|e| map_transport_error(provider, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(status_to_error(provider, status, response).await);
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| map_transport_error(provider, e))?;

    serde_json::from_slice(&bytes).map_err(|e| ProviderError::response_parsing(provider, e.to_string()))
}

/// GET a probe endpoint, true on any 2xx
pub(crate) async fn probe(client: &Client, url: &str, api_key: Option<&str>) -> bool {
    let mut request = client.get(url);
    if let Some(key) = api_key {
        request = request.bearer_auth(key);
    }
    match request.send().await {
        Ok(response) => response.status().is_success(),
        Err(e) => {
            debug!("Health probe {} failed: {}", url, e);
            false
        }
    }
}

/// Map a transport-level reqwest failure
pub(crate) fn map_transport_error(provider: &'static str, error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::timeout(provider, error.to_string())
    } else if error.is_connect() {
        ProviderError::network(provider, error.to_string())
    } else if error.is_decode() {
        ProviderError::response_parsing(provider, error.to_string())
    } else {
        ProviderError::other(provider, error.to_string())
    }
}

/// Map a non-success HTTP status to the unified error
pub(crate) async fn status_to_error(
    provider: &'static str,
    status: StatusCode,
    response: Response,
) -> ProviderError {
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let error_text = response.text().await.unwrap_or_default();

    match status.as_u16() {
        401 | 403 => ProviderError::authentication(
            provider,
            format!("Authentication failed: {}", error_text),
        ),
        404 => ProviderError::model_not_found(provider, error_text),
        408 => ProviderError::timeout(provider, format!("Request timeout: {}", error_text)),
        429 => ProviderError::RateLimit {
            provider,
            message: format!("Rate limit exceeded: {}", error_text),
            retry_after,
        },
        503 => ProviderError::service_unavailable(provider, error_text),
        code => ProviderError::api_error(provider, code, error_text),
    }
}

/// Short sha256 fingerprint of a secret
pub(crate) fn fingerprint(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    hex::encode(&digest[..8])
}
