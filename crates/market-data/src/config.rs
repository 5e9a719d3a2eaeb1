//! Service configuration.

use std::time::Duration;

use crate::errors::MarketDataError;
use crate::sources::http::REQUEST_TIMEOUT;

/// Default origin serving the `/api/stocks/*` routes.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Time-to-live per cached operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheTtls {
    /// Single-symbol quotes.
    pub quote: Duration,
    pub indices: Duration,
    pub search: Duration,
    pub overview: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            quote: Duration::from_millis(30_000),
            indices: Duration::from_millis(60_000),
            search: Duration::from_millis(60_000),
            overview: Duration::from_millis(30_000),
        }
    }
}

/// Configuration for [`IndianMarketService::from_config`](crate::IndianMarketService::from_config).
#[derive(Clone, Debug)]
pub struct MarketDataConfig {
    /// Origin of the `/api/stocks/*` routes.
    pub base_url: String,

    /// Per-request timeout for every source call.
    pub request_timeout: Duration,

    pub ttls: CacheTtls,

    /// Skip the network entirely and serve synthesized data.
    pub offline: bool,

    /// Seed for the synthesizer, for reproducible mock data.
    pub mock_seed: Option<u64>,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: REQUEST_TIMEOUT,
            ttls: CacheTtls::default(),
            offline: false,
            mock_seed: None,
        }
    }
}

impl MarketDataConfig {
    pub fn validate(&self) -> Result<(), MarketDataError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(MarketDataError::InvalidConfig(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(MarketDataError::InvalidConfig(
                "request_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
