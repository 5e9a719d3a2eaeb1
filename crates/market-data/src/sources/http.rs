//! Shared HTTP plumbing for the source clients.

use std::time::Duration;

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::errors::MarketDataError;

/// Default per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Headers sent with every source request.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers
}

/// Build a client with the shared headers and `timeout`.
pub fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .default_headers(default_headers())
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!("Failed to build HTTP client ({}), using defaults", e);
            Client::new()
        })
}

/// Join a base URL and an absolute route path.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn transport_error(e: reqwest::Error, source_id: &str) -> MarketDataError {
    if e.is_timeout() {
        MarketDataError::Timeout {
            source_id: source_id.to_string(),
        }
    } else {
        MarketDataError::Network(e)
    }
}

/// GET `url` and decode the JSON body.
///
/// Timeouts, non-2xx statuses and undecodable bodies each map to their own
/// error variant; callers treat them all as the source being unavailable.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    source_id: &str,
) -> Result<T, MarketDataError> {
    debug!("GET {} ({})", url, source_id);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| transport_error(e, source_id))?;

    let status = response.status();
    if !status.is_success() {
        return Err(MarketDataError::HttpStatus {
            source_id: source_id.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| transport_error(e, source_id))?;

    serde_json::from_str(&body).map_err(|e| MarketDataError::Parse {
        source_id: source_id.to_string(),
        message: format!("Failed to parse response: {}", e),
    })
}
